use std::path::Path;

use image::imageops::FilterType;
use tract_onnx::prelude::*;

use crate::{
    domain::common::entities::app_errors::CoreError,
    infrastructure::detection::postprocess::{DecodeParams, RawDetection, decode_output},
};

type YoloPlan = TypedRunnableModel<TypedModel>;

/// Metadata key under which ultralytics exports store the class names.
const NAMES_METADATA_KEY: &str = "names";

/// Detections for one image, boxes already in image pixels.
#[derive(Debug, Clone)]
pub struct ImageDetections {
    pub width: u32,
    pub height: u32,
    pub detections: Vec<RawDetection>,
}

/// YOLO detection model exported to ONNX, executed with tract.
pub struct OnnxYoloModel {
    plan: YoloPlan,
    input_size: u32,
    class_names: Vec<String>,
}

impl std::fmt::Debug for OnnxYoloModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxYoloModel")
            .field("input_size", &self.input_size)
            .field("classes", &self.class_names.len())
            .finish_non_exhaustive()
    }
}

fn build_plan(path: &Path, input_size: usize) -> TractResult<(YoloPlan, Vec<String>)> {
    let onnx = tract_onnx::onnx();
    let proto = onnx.proto_model_for_path(path)?;
    let class_names = proto
        .metadata_props
        .iter()
        .find(|prop| prop.key == NAMES_METADATA_KEY)
        .map(|prop| parse_names_metadata(&prop.value))
        .unwrap_or_default();

    let plan = onnx
        .model_for_proto_model(&proto)?
        .with_input_fact(0, f32::fact([1, 3, input_size, input_size]).into())?
        .into_optimized()?
        .into_runnable()?;

    Ok((plan, class_names))
}

/// Parses the `{0: 'rice', 1: 'noodles'}` dictionary written by ultralytics exports.
/// Indices missing from the dictionary keep a `class_<id>` placeholder.
pub fn parse_names_metadata(value: &str) -> Vec<String> {
    let mut entries: Vec<(usize, String)> = Vec::new();
    let mut rest = value.trim().trim_start_matches('{').trim_end_matches('}');

    while let Some(colon) = rest.find(':') {
        let Ok(index) = rest[..colon].trim().trim_start_matches(',').trim().parse::<usize>() else {
            break;
        };
        let after = rest[colon + 1..].trim_start();
        let Some(quote) = after.chars().next().filter(|c| *c == '\'' || *c == '"') else {
            break;
        };
        let Some(end) = after[1..].find(quote) else {
            break;
        };

        entries.push((index, after[1..1 + end].to_string()));
        rest = &after[end + 2..];
    }

    let len = entries.iter().map(|(index, _)| index + 1).max().unwrap_or(0);
    let mut names: Vec<String> = (0..len).map(|index| format!("class_{}", index)).collect();
    for (index, name) in entries {
        names[index] = name;
    }
    names
}

impl OnnxYoloModel {
    pub fn load(path: &Path, input_size: u32) -> Result<Self, CoreError> {
        if !path.is_file() {
            return Err(CoreError::Inference(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let (plan, class_names) = build_plan(path, input_size as usize).map_err(|e| {
            CoreError::Inference(format!("Failed to load model {}: {}", path.display(), e))
        })?;

        Ok(Self {
            plan,
            input_size,
            class_names,
        })
    }

    /// Class names embedded in the model metadata, empty when the export carries none.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Blocking; call from a blocking-capable thread.
    pub fn infer(&self, image_path: &Path, params: &DecodeParams) -> Result<ImageDetections, CoreError> {
        let image = image::open(image_path)
            .map_err(|e| CoreError::Inference(format!("Failed to decode image: {}", e)))?;
        let (width, height) = (image.width(), image.height());

        let size = self.input_size;
        let rgb = image.resize_exact(size, size, FilterType::Triangle).to_rgb8();
        let input: Tensor = tract_ndarray::Array4::from_shape_fn(
            (1, 3, size as usize, size as usize),
            |(_, c, y, x)| rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
        )
        .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| CoreError::Inference(format!("Model execution failed: {}", e)))?;
        let output = outputs
            .first()
            .ok_or_else(|| CoreError::Inference("Model produced no output".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| CoreError::Inference(format!("Unexpected output type: {}", e)))?;

        let shape = view.shape().to_vec();
        let data: Vec<f32> = view.iter().copied().collect();
        let detections = decode_output(&shape, &data, params)?
            .into_iter()
            .map(|det| det.scaled(size, width, height))
            .collect();

        Ok(ImageDetections {
            width,
            height,
            detections,
        })
    }
}
