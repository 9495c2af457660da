//! Label mapper: turns a point dataset into positioned text labels.

use cgmath::Vector3;

use crate::error::VizError;
use crate::pipeline::{evaluate, Dataset, FilterRef, InputPort};
use crate::text::TextProperty;

/// What the text of each label is taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMode {
    /// Label each point with its id array entry (or its index when no id
    /// array is attached)
    Ids,
    /// Label each point with the value of the named point array
    FieldData(String),
}

/// One rendered label: anchor position in world space plus its text
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Vector3<f32>,
    pub text: String,
}

/// 2D-overlay text renderer over the points of its input chain
///
/// The mapper pulls its input on demand and produces one label per point.
/// Numeric formatting keeps integers clean (ids render as `12`, field data
/// as the shortest `f64` display form).
pub struct LabeledDataMapper {
    input: Option<FilterRef>,
    mode: LabelMode,
    text_property: TextProperty,
}

impl LabeledDataMapper {
    pub fn new() -> Self {
        Self {
            input: None,
            mode: LabelMode::Ids,
            text_property: TextProperty::default(),
        }
    }

    /// Select what label text is generated from
    pub fn set_mode(&mut self, mode: LabelMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> &LabelMode {
        &self.mode
    }

    pub fn text_property(&self) -> &TextProperty {
        &self.text_property
    }

    pub fn text_property_mut(&mut self) -> &mut TextProperty {
        &mut self.text_property
    }

    /// Pull the input chain and generate one label per visible point
    pub fn labels(&self) -> Result<Vec<Label>, VizError> {
        let input = self
            .input
            .as_ref()
            .ok_or(VizError::MissingInput("LabeledDataMapper"))?;
        let data = evaluate(input)?;
        self.labels_for(&data)
    }

    fn labels_for(&self, data: &Dataset) -> Result<Vec<Label>, VizError> {
        let texts: Vec<String> = match &self.mode {
            LabelMode::Ids => match &data.point_ids {
                Some(ids) => ids.iter().map(|id| id.to_string()).collect(),
                None => (0..data.num_points()).map(|i| i.to_string()).collect(),
            },
            LabelMode::FieldData(name) => {
                let values = data
                    .point_arrays
                    .get(name)
                    .ok_or_else(|| VizError::MissingArray(name.clone()))?;
                values.iter().map(|v| v.to_string()).collect()
            }
        };

        Ok(data
            .points
            .iter()
            .zip(texts)
            .map(|(&position, text)| Label { position, text })
            .collect())
    }
}

impl Default for LabeledDataMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for LabeledDataMapper {
    fn set_input(&mut self, input: FilterRef) {
        self.input = Some(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{filter_ref, Cell, ExtractBlock, IdFilter};

    fn labeled_chain(mode: LabelMode) -> LabeledDataMapper {
        let mut mesh = Dataset::default();
        mesh.points = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        mesh.cells = vec![Cell::new(1, vec![0, 1, 2])];
        mesh.point_arrays
            .insert("temp".to_string(), vec![1.5, 2.0, 2.5]);

        let extract = filter_ref(ExtractBlock::new(mesh));
        let ids = filter_ref(IdFilter::new());
        ids.borrow_mut().set_input(extract);

        let mut mapper = LabeledDataMapper::new();
        mapper.set_input(ids);
        mapper.set_mode(mode);
        mapper
    }

    #[test]
    fn ids_mode_labels_points_with_their_ids() {
        let mapper = labeled_chain(LabelMode::Ids);
        let labels = mapper.labels().unwrap();
        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["0", "1", "2"]);
        assert_eq!(labels[1].position, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn field_data_mode_labels_points_with_array_values() {
        let mapper = labeled_chain(LabelMode::FieldData("temp".to_string()));
        let texts: Vec<String> = mapper.labels().unwrap().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["1.5", "2", "2.5"]);
    }

    #[test]
    fn field_data_mode_requires_the_named_array() {
        let mapper = labeled_chain(LabelMode::FieldData("pressure".to_string()));
        assert!(matches!(
            mapper.labels(),
            Err(VizError::MissingArray(name)) if name == "pressure"
        ));
    }

    #[test]
    fn unconnected_mapper_is_an_error() {
        let mapper = LabeledDataMapper::new();
        assert!(matches!(
            mapper.labels(),
            Err(VizError::MissingInput("LabeledDataMapper"))
        ));
    }
}
