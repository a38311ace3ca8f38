//! Liquid source of the installed section.
//!
//! The body is fixed. The only variable part is the leading HTML comment
//! naming the file key. The `{% schema %}` block is produced with
//! `serde_json` so it is always valid JSON for the theme editor.

use serde::Serialize;
use theme_sections_core::SECTION_DISPLAY_NAME;

/// Theme editor category the preset is listed under.
const PRESET_CATEGORY: &str = "Custom";

const SECTION_MARKUP: &str = r#"<div class="simple-template">
  <h2>Simple Template Section</h2>
  <p>This is a simple template added to your theme!</p>
  <style>
    .simple-template {
      padding: 20px;
      background-color: #f9f9f9;
      border: 1px solid #ddd;
      border-radius: 5px;
    }
    .simple-template h2 {
      color: #333;
    }
    .simple-template p {
      color: #666;
    }
  </style>
</div>
"#;

#[derive(Debug, Serialize)]
struct SectionSchema<'a> {
    name: &'a str,
    settings: Vec<serde_json::Value>,
    presets: Vec<SectionPreset<'a>>,
}

#[derive(Debug, Serialize)]
struct SectionPreset<'a> {
    name: &'a str,
    category: &'a str,
}

fn schema_json() -> String {
    let schema = SectionSchema {
        name: SECTION_DISPLAY_NAME,
        settings: Vec::new(),
        presets: vec![SectionPreset {
            name: SECTION_DISPLAY_NAME,
            category: PRESET_CATEGORY,
        }],
    };

    // Serializing string fields and empty arrays cannot fail
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

/// Render the section document stored under `key`.
#[must_use]
pub fn render_section(key: &str) -> String {
    format!(
        "<!-- {key} -->\n{SECTION_MARKUP}\n{{% schema %}}\n{schema}\n{{% endschema %}}\n",
        schema = schema_json()
    )
}
