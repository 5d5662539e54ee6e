use crate::application::http::{
    dish::router::DishApiDoc, health::router::HealthApiDoc,
    recognition::router::RecognitionApiDoc, training::router::TrainingApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dish Recognition API",
        description = "Canteen dish recognition with a YOLO detector"
    ),
    nest(
        (path = String::new(), api = HealthApiDoc),
        (path = String::new(), api = RecognitionApiDoc),
        (path = String::new(), api = DishApiDoc),
        (path = String::new(), api = TrainingApiDoc),
    )
)]
pub struct ApiDoc;
