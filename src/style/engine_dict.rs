//! Typed accessors over a type layer's raw style dictionary.
//!
//! The dictionary is loosely structured: any level may be missing. Each
//! accessor here walks one path and owns the default for that field, so
//! the resolver never chains lookups inline. A missing dictionary level
//! yields the default; a run array that exists but cannot be indexed is
//! reported as malformed.

use serde_json::Value;

use super::StyleError;

/// Borrowed view of a layer's style dictionary.
#[derive(Debug, Clone, Copy)]
pub struct EngineDict<'a> {
    root: &'a Value,
}

impl<'a> EngineDict<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// `<run>→RunArray[0]`, or `None` when the run or its array is absent.
    fn first_run(&self, run: &'static str) -> Result<Option<&'a Value>, StyleError> {
        let Some(array) = self.root.get(run).and_then(|r| r.get("RunArray")) else {
            return Ok(None);
        };
        match array.as_array().map(|a| a.first()) {
            Some(Some(first)) => Ok(Some(first)),
            Some(None) => Err(StyleError::Malformed(format!("{run}.RunArray is empty"))),
            None => Err(StyleError::Malformed(format!("{run}.RunArray is not an array"))),
        }
    }

    /// `StyleRun→RunArray[0]→StyleSheet→StyleSheetData`.
    pub fn style_sheet_data(&self) -> Result<StyleSheetData<'a>, StyleError> {
        let data = self
            .first_run("StyleRun")?
            .and_then(|run| run.get("StyleSheet"))
            .and_then(|sheet| sheet.get("StyleSheetData"));
        Ok(StyleSheetData { data })
    }

    /// `ParagraphRun→RunArray[0]→ParagraphSheet→Properties→Justification`,
    /// lower-cased. Anything but a string yields `"left"`.
    pub fn justification(&self) -> Result<String, StyleError> {
        let value = self
            .first_run("ParagraphRun")?
            .and_then(|run| run.get("ParagraphSheet"))
            .and_then(|sheet| sheet.get("Properties"))
            .and_then(|props| props.get("Justification"))
            .and_then(Value::as_str);
        Ok(value.map_or_else(|| DEFAULT_JUSTIFICATION.to_string(), str::to_lowercase))
    }

    /// `ResourceDict→FontSet`, empty when absent.
    pub fn font_set(&self) -> FontSet<'a> {
        let entries = self
            .root
            .get("ResourceDict")
            .and_then(|r| r.get("FontSet"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        FontSet { entries }
    }
}

pub const DEFAULT_JUSTIFICATION: &str = "left";

/// Character style of the first style run.
#[derive(Debug, Clone, Copy)]
pub struct StyleSheetData<'a> {
    data: Option<&'a Value>,
}

impl<'a> StyleSheetData<'a> {
    fn field(&self, key: &str) -> Option<&'a Value> {
        self.data.and_then(|d| d.get(key))
    }

    /// Index into the font set. Only non-negative integers count.
    pub fn font_index(&self) -> Option<usize> {
        self.field("Font")
            .and_then(Value::as_u64)
            .and_then(|i| usize::try_from(i).ok())
    }

    /// `Leading`, default `0`.
    pub fn leading(&self) -> f64 {
        self.field("Leading").and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// `FontSize`, default `0`.
    pub fn font_size(&self) -> f64 {
        self.field("FontSize").and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// `FillColor→Values`, when present as an array.
    pub fn fill_color_values(&self) -> Option<&'a [Value]> {
        self.field("FillColor")
            .and_then(|c| c.get("Values"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

/// `ResourceDict→FontSet` entries.
#[derive(Debug, Clone, Copy)]
pub struct FontSet<'a> {
    entries: &'a [Value],
}

impl<'a> FontSet<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Name` of the entry at `index`.
    ///
    /// `None` if the index is out of range; an error if the entry exists
    /// but has no string `Name`.
    pub fn name_at(&self, index: usize) -> Result<Option<&'a str>, StyleError> {
        let Some(entry) = self.entries.get(index) else {
            return Ok(None);
        };
        entry
            .get("Name")
            .and_then(Value::as_str)
            .map(Some)
            .ok_or_else(|| StyleError::MissingKey(format!("ResourceDict.FontSet[{index}].Name")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_dict_yields_defaults() {
        let root = json!({});
        let dict = EngineDict::new(&root);
        let data = dict.style_sheet_data().unwrap();
        assert_eq!(data.font_index(), None);
        assert_eq!(data.leading(), 0.0);
        assert_eq!(data.font_size(), 0.0);
        assert!(data.fill_color_values().is_none());
        assert_eq!(dict.justification().unwrap(), "left");
        assert!(dict.font_set().is_empty());
    }

    #[test]
    fn reads_first_style_run() {
        let root = json!({
            "StyleRun": { "RunArray": [
                { "StyleSheet": { "StyleSheetData": {
                    "Font": 1, "Leading": 30.5, "FontSize": 24.9,
                    "FillColor": { "Values": [1.0, 0.0, 0.5, 1.0] }
                }}},
                { "StyleSheet": { "StyleSheetData": { "Font": 0 } } }
            ]}
        });
        let data = EngineDict::new(&root).style_sheet_data().unwrap();
        assert_eq!(data.font_index(), Some(1));
        assert_eq!(data.leading(), 30.5);
        assert_eq!(data.font_size(), 24.9);
        assert_eq!(data.fill_color_values().map(<[Value]>::len), Some(4));
    }

    #[test]
    fn empty_run_array_is_malformed() {
        let root = json!({ "StyleRun": { "RunArray": [] } });
        let dict = EngineDict::new(&root);
        assert!(matches!(dict.style_sheet_data(), Err(StyleError::Malformed(_))));

        let root = json!({ "ParagraphRun": { "RunArray": {} } });
        let dict = EngineDict::new(&root);
        assert!(matches!(dict.justification(), Err(StyleError::Malformed(_))));
    }

    #[test]
    fn justification_normalization() {
        let para = |j: Value| {
            json!({ "ParagraphRun": { "RunArray": [
                { "ParagraphSheet": { "Properties": { "Justification": j } } }
            ]}})
        };
        let root = para(json!("Center"));
        assert_eq!(EngineDict::new(&root).justification().unwrap(), "center");
        let root = para(json!(2));
        assert_eq!(EngineDict::new(&root).justification().unwrap(), "left");
        let root = para(Value::Null);
        assert_eq!(EngineDict::new(&root).justification().unwrap(), "left");
    }

    #[test]
    fn negative_or_fractional_font_index_is_invalid() {
        for font in [json!(-1), json!(1.5), json!("0")] {
            let root = json!({ "StyleRun": { "RunArray": [
                { "StyleSheet": { "StyleSheetData": { "Font": font } } }
            ]}});
            let data = EngineDict::new(&root).style_sheet_data().unwrap();
            assert_eq!(data.font_index(), None);
        }
    }

    #[test]
    fn font_set_lookup() {
        let root = json!({ "ResourceDict": { "FontSet": [
            { "Name": "Arial" }, { "Synthetic": 0 }
        ]}});
        let set = EngineDict::new(&root).font_set();
        assert_eq!(set.len(), 2);
        assert_eq!(set.name_at(0).unwrap(), Some("Arial"));
        assert!(matches!(set.name_at(1), Err(StyleError::MissingKey(_))));
        assert_eq!(set.name_at(2).unwrap(), None);
    }
}
