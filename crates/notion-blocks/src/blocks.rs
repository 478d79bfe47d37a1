//! Notion block model and annotation block builder
//!
//! Only the pieces of Notion's block schema that an annotation uses are
//! modelled here. Serialization matches the shape accepted by
//! `PATCH /v1/blocks/{block_id}/children`:
//!
//! ```json
//! {"object": "block", "type": "callout", "callout": {"rich_text": [...], "icon": {...}}}
//! ```

use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::segment::NormalizedText;

/// Timestamp format used in the header line.
pub const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Emoji placed on the annotation callout.
pub const CALLOUT_EMOJI: &str = "💬";

/// Annotation submitted by the viewer
///
/// Every field is optional on the wire; missing fields fall back to the
/// defaults the viewer has always relied on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationRequest {
    pub pdf_name: String,
    pub page_num: i64,
    pub selected_text: String,
    pub annotation: String,
}

impl Default for AnnotationRequest {
    fn default() -> Self {
        Self {
            pdf_name: "Unknown PDF".to_string(),
            page_num: 0,
            selected_text: String::new(),
            annotation: String::new(),
        }
    }
}

/// Text colors accepted in rich text annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
}

/// Styling for a rich text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Annotations {
    pub bold: bool,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TextContent {
    content: String,
}

/// A single `text` span inside a `rich_text` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotations: Option<Annotations>,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: TextContent {
                content: content.into(),
            },
            annotations: None,
        }
    }

    pub fn styled(content: impl Into<String>, annotations: Annotations) -> Self {
        Self {
            annotations: Some(annotations),
            ..Self::plain(content)
        }
    }

    pub fn content(&self) -> &str {
        &self.text.content
    }

    pub fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

/// Block icon. Notion also supports external and file icons; we only emit emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
}

#[derive(Serialize)]
struct EmptyBody {}

#[derive(Serialize)]
struct TextBody<'a> {
    rich_text: &'a [RichText],
}

#[derive(Serialize)]
struct CalloutBody<'a> {
    rich_text: &'a [RichText],
    icon: &'a Icon,
}

/// A Notion block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Divider,
    Paragraph { rich_text: Vec<RichText> },
    BulletedListItem { rich_text: Vec<RichText> },
    Callout { rich_text: Vec<RichText>, icon: Icon },
}

impl Block {
    /// Notion's `type` tag for this block.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Divider => "divider",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletedListItem { .. } => "bulleted_list_item",
            Block::Callout { .. } => "callout",
        }
    }

    pub fn rich_text(&self) -> &[RichText] {
        match self {
            Block::Divider => &[],
            Block::Paragraph { rich_text }
            | Block::BulletedListItem { rich_text }
            | Block::Callout { rich_text, .. } => rich_text.as_slice(),
        }
    }

    /// Concatenated plain text of every span in the block.
    pub fn plain_text(&self) -> String {
        self.rich_text().iter().map(RichText::content).collect()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", self.kind())?;
        match self {
            Block::Divider => map.serialize_entry(self.kind(), &EmptyBody {})?,
            Block::Paragraph { rich_text } | Block::BulletedListItem { rich_text } => {
                map.serialize_entry(
                    self.kind(),
                    &TextBody {
                        rich_text: rich_text.as_slice(),
                    },
                )?
            }
            Block::Callout { rich_text, icon } => {
                map.serialize_entry(
                    self.kind(),
                    &CalloutBody {
                        rich_text: rich_text.as_slice(),
                        icon,
                    },
                )?
            }
        }
        map.end()
    }
}

/// Request body for appending children to a block or page.
#[derive(Debug, Clone, Serialize)]
pub struct AppendChildren<'a> {
    pub children: &'a [Block],
}

/// Build the block sequence for one annotation.
///
/// The sequence is always: divider, bold gray header paragraph, one bullet
/// per sentence of the selection, then a callout holding the annotation
/// verbatim. An empty selection yields no bullets but keeps the frame.
pub fn build_blocks(request: &AnnotationRequest, now: NaiveDateTime) -> Vec<Block> {
    let selection = NormalizedText::new(&request.selected_text);
    let bullets = selection.sentences();

    let mut blocks = Vec::with_capacity(3 + bullets.clone().count());
    blocks.push(Block::Divider);
    blocks.push(Block::Paragraph {
        rich_text: vec![RichText::styled(
            header_line(request, now),
            Annotations {
                bold: true,
                color: Color::Gray,
            },
        )],
    });
    blocks.extend(bullets.map(|sentence| Block::BulletedListItem {
        rich_text: vec![RichText::plain(sentence)],
    }));
    blocks.push(Block::Callout {
        rich_text: vec![RichText::plain(request.annotation.as_str())],
        icon: Icon::Emoji {
            emoji: CALLOUT_EMOJI.to_string(),
        },
    });
    blocks
}

fn header_line(request: &AnnotationRequest, now: NaiveDateTime) -> String {
    format!(
        "📄 {} | Page {} | {}",
        request.pdf_name,
        request.page_num,
        now.format(HEADER_TIME_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 59))
            .unwrap()
    }

    fn request(selected: &str, annotation: &str) -> AnnotationRequest {
        AnnotationRequest {
            pdf_name: "paper.pdf".to_string(),
            page_num: 7,
            selected_text: selected.to_string(),
            annotation: annotation.to_string(),
        }
    }

    #[test]
    fn builds_frame_around_bullets() {
        let blocks = build_blocks(&request("First. Second!", "my note"), fixed_time());

        let kinds: Vec<_> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "divider",
                "paragraph",
                "bulleted_list_item",
                "bulleted_list_item",
                "callout"
            ]
        );
        assert_eq!(blocks[1].plain_text(), "📄 paper.pdf | Page 7 | 2024-03-09 14:05");
        assert_eq!(blocks[2].plain_text(), "First.");
        assert_eq!(blocks[3].plain_text(), "Second!");
        assert_eq!(blocks[4].plain_text(), "my note");
    }

    #[test]
    fn empty_selection_keeps_header_and_callout() {
        let blocks = build_blocks(&request("", "only a note"), fixed_time());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::Divider);
        assert_eq!(blocks[2].kind(), "callout");
    }

    #[test]
    fn annotation_is_not_segmented() {
        let note = "Line one.  Line two?\nStill one callout.";
        let blocks = build_blocks(&request("x", note), fixed_time());
        assert_eq!(blocks.last().unwrap().plain_text(), note);
    }

    #[test]
    fn serializes_to_notion_schema() {
        let blocks = build_blocks(&request("Hello there.", "note"), fixed_time());
        let value = serde_json::to_value(AppendChildren { children: &blocks }).unwrap();

        assert_eq!(
            value,
            json!({
                "children": [
                    {"object": "block", "type": "divider", "divider": {}},
                    {
                        "object": "block",
                        "type": "paragraph",
                        "paragraph": {
                            "rich_text": [{
                                "type": "text",
                                "text": {"content": "📄 paper.pdf | Page 7 | 2024-03-09 14:05"},
                                "annotations": {"bold": true, "color": "gray"}
                            }]
                        }
                    },
                    {
                        "object": "block",
                        "type": "bulleted_list_item",
                        "bulleted_list_item": {
                            "rich_text": [{"type": "text", "text": {"content": "Hello there."}}]
                        }
                    },
                    {
                        "object": "block",
                        "type": "callout",
                        "callout": {
                            "rich_text": [{"type": "text", "text": {"content": "note"}}],
                            "icon": {"type": "emoji", "emoji": "💬"}
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn request_fields_default_when_missing() {
        let req: AnnotationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, AnnotationRequest::default());
        assert_eq!(req.pdf_name, "Unknown PDF");
        assert_eq!(req.page_num, 0);
    }

    #[test]
    fn request_uses_camel_case_names() {
        let req: AnnotationRequest = serde_json::from_value(json!({
            "pdfName": "a.pdf",
            "pageNum": 3,
            "selectedText": "Some text.",
        }))
        .unwrap();
        assert_eq!(req.pdf_name, "a.pdf");
        assert_eq!(req.page_num, 3);
        assert_eq!(req.selected_text, "Some text.");
        assert_eq!(req.annotation, "");
    }
}
