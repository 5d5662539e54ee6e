//! Decoding of raw YOLO output tensors.
//!
//! Two layouts are understood:
//! * `[1, N, 6]` end-to-end rows `x1, y1, x2, y2, score, class` (YOLOv10 exports)
//! * `[1, 4 + C, N]` channel-major `cx, cy, w, h, class scores...` (YOLOv8/11 exports),
//!   which still needs non-maximum suppression.
//!
//! Boxes are in model-input pixels until [`RawDetection::scaled`] maps them to the image.

use std::cmp::Ordering;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeParams {
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    pub bbox: [f32; 4],
    pub score: f32,
    pub class_id: usize,
}

impl RawDetection {
    /// Maps a box from the square model input back onto a `width` x `height` image.
    pub fn scaled(self, input_size: u32, width: u32, height: u32) -> Self {
        let sx = width as f32 / input_size as f32;
        let sy = height as f32 / input_size as f32;
        let (w, h) = (width as f32, height as f32);

        Self {
            bbox: [
                (self.bbox[0] * sx).clamp(0.0, w),
                (self.bbox[1] * sy).clamp(0.0, h),
                (self.bbox[2] * sx).clamp(0.0, w),
                (self.bbox[3] * sy).clamp(0.0, h),
            ],
            ..self
        }
    }
}

pub fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let ix1 = a[0].max(b[0]);
    let iy1 = a[1].max(b[1]);
    let ix2 = a[2].min(b[2]);
    let iy2 = a[3].min(b[3]);
    let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter + 1e-6)
}

fn by_score_desc(a: &RawDetection, b: &RawDetection) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Per-class suppression; the result is score-descending.
pub fn non_max_suppression(
    mut detections: Vec<RawDetection>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<RawDetection> {
    detections.sort_by(by_score_desc);

    let mut keep: Vec<RawDetection> = Vec::with_capacity(max_detections.min(detections.len()));
    'outer: for det in detections {
        for kept in &keep {
            if kept.class_id == det.class_id && iou(&det.bbox, &kept.bbox) > iou_threshold {
                continue 'outer;
            }
        }
        keep.push(det);
        if keep.len() >= max_detections {
            break;
        }
    }
    keep
}

pub fn decode_output(
    shape: &[usize],
    data: &[f32],
    params: &DecodeParams,
) -> Result<Vec<RawDetection>, CoreError> {
    let [batch, rows, cols] = shape else {
        return Err(CoreError::Inference(format!(
            "Unexpected output shape {:?}",
            shape
        )));
    };
    if *batch != 1 || data.len() != rows * cols {
        return Err(CoreError::Inference(format!(
            "Unexpected output shape {:?} for {} values",
            shape,
            data.len()
        )));
    }

    if *cols == 6 {
        Ok(decode_end_to_end(*rows, data, params))
    } else if *rows > 4 {
        Ok(decode_channel_major(*rows, *cols, data, params))
    } else {
        Err(CoreError::Inference(format!(
            "Unsupported output layout {:?}",
            shape
        )))
    }
}

fn decode_end_to_end(rows: usize, data: &[f32], params: &DecodeParams) -> Vec<RawDetection> {
    let mut detections: Vec<RawDetection> = data
        .chunks_exact(6)
        .take(rows)
        .filter(|row| row[4] >= params.conf_threshold)
        .map(|row| RawDetection {
            bbox: [row[0], row[1], row[2], row[3]],
            score: row[4],
            class_id: row[5].max(0.0) as usize,
        })
        .collect();

    detections.sort_by(by_score_desc);
    detections.truncate(params.max_detections);
    detections
}

fn decode_channel_major(
    channels: usize,
    anchors: usize,
    data: &[f32],
    params: &DecodeParams,
) -> Vec<RawDetection> {
    let at = |channel: usize, anchor: usize| data[channel * anchors + anchor];
    let mut candidates = Vec::new();

    for anchor in 0..anchors {
        let (class_id, score) = (4..channels)
            .map(|channel| (channel - 4, at(channel, anchor)))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .unwrap_or((0, 0.0));

        if score < params.conf_threshold {
            continue;
        }

        let (cx, cy) = (at(0, anchor), at(1, anchor));
        let (w, h) = (at(2, anchor), at(3, anchor));
        candidates.push(RawDetection {
            bbox: [cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0],
            score,
            class_id,
        });
    }

    non_max_suppression(candidates, params.iou_threshold, params.max_detections)
}
