use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct RecognizeDishInput {
    pub image_data: Bytes,
}
