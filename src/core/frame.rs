use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TransitionOptions;

/// Named snapshot of data/layout deltas plus the trace indices they apply to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    /// Group tag used to replay several frames with a single animate call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// One patch value per affected trace, in `traces` order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    /// Trace indices the data patch applies to. `None` means every trace,
    /// resolved by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traces: Option<Vec<usize>>,
    /// Frame-level override of the caller-supplied transition options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionOptions>,
}

impl Frame {
    pub(crate) fn from_definition(name: String, definition: FrameDefinition) -> Self {
        Self {
            name,
            group: definition.group,
            data: definition.data,
            layout: definition.layout,
            traces: definition.traces,
            transition: definition.transition,
        }
    }

    /// Merges a later definition of the same frame over this one.
    ///
    /// Only fields the definition actually supplies are replaced.
    pub(crate) fn merge(&mut self, definition: FrameDefinition) {
        if definition.group.is_some() {
            self.group = definition.group;
        }
        if definition.data.is_some() {
            self.data = definition.data;
        }
        if definition.layout.is_some() {
            self.layout = definition.layout;
        }
        if definition.traces.is_some() {
            self.traces = definition.traces;
        }
        if definition.transition.is_some() {
            self.transition = definition.transition;
        }
    }
}

/// Caller-supplied frame payload for [`FrameStore::add_frames`].
///
/// Identical to [`Frame`] except the name is optional: anonymous
/// definitions receive a generated `frame N` name on insertion.
///
/// [`FrameStore::add_frames`]: super::FrameStore::add_frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traces: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionOptions>,
}

impl FrameDefinition {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Definition without a name; the store generates one on insertion.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<Value>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Value) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn with_traces(mut self, traces: Vec<usize>) -> Self {
        self.traces = Some(traces);
        self
    }

    #[must_use]
    pub fn with_transition(mut self, transition: TransitionOptions) -> Self {
        self.transition = Some(transition);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FrameDefinition;

    #[test]
    fn definition_deserializes_from_declarative_document() {
        let definition: FrameDefinition = serde_json::from_value(json!({
            "name": "frame0",
            "group": "even-frames",
            "data": [{ "y": [1, 2, 3] }],
            "layout": { "xaxis": { "range": [0, 2] } },
            "traces": [0]
        }))
        .expect("valid frame document");

        assert_eq!(definition.name.as_deref(), Some("frame0"));
        assert_eq!(definition.group.as_deref(), Some("even-frames"));
        assert_eq!(definition.traces, Some(vec![0]));
        assert!(definition.transition.is_none());
    }

    #[test]
    fn merge_replaces_only_supplied_fields() {
        let mut frame = super::Frame::from_definition(
            "frame0".to_owned(),
            FrameDefinition::named("frame0")
                .with_group("even-frames")
                .with_data(vec![json!({ "y": [1] })]),
        );

        frame.merge(FrameDefinition::named("frame0").with_layout(json!({ "title": "merged" })));

        assert_eq!(frame.group.as_deref(), Some("even-frames"));
        assert_eq!(frame.data, Some(vec![json!({ "y": [1] })]));
        assert_eq!(frame.layout, Some(json!({ "title": "merged" })));
    }
}
