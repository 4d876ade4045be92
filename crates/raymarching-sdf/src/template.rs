//! Shader template handling
//!
//! A template is a GLSL source whose first line (usually `#version`) is kept
//! verbatim; the generated blocks are inserted right after it as two macro
//! definitions that the rest of the template expands.

use crate::{Error, Result};

/// Macro receiving the declarations of every node
pub const SDFTYPES_MACRO: &str = "TEMPLATE_SDFTYPES";
/// Macro receiving the final `return sdist(p, ...);` statement
pub const SDSCENE_MACRO: &str = "TEMPLATE_SDSCENE";

/// Fragment shader template bundled with the crate
pub fn default_template() -> &'static str {
    include_str!("shaders/raymarching.frag")
}

/// Check that a template expands both generated macros after its first line
pub fn validate_template(template: &str) -> Result<()> {
    let (_, rest) = split_first_line(template);
    for marker in [SDFTYPES_MACRO, SDSCENE_MACRO] {
        if !rest.contains(marker) {
            return Err(Error::Template(format!("missing {marker}")));
        }
    }
    Ok(())
}

/// Insert the two generated blocks into `template`
pub fn merge_template(template: &str, declarations: &str, scene: &str) -> String {
    let (first_line, rest) = split_first_line(template);
    let mut out = String::with_capacity(template.len() + declarations.len() + scene.len() + 64);
    out.push_str(first_line);
    push_define(&mut out, SDFTYPES_MACRO, declarations);
    push_define(&mut out, SDSCENE_MACRO, scene);
    out.push_str(rest);
    out
}

/// First line including its newline, and everything after it
fn split_first_line(template: &str) -> (&str, &str) {
    match template.find('\n') {
        Some(pos) => template.split_at(pos + 1),
        None => (template, ""),
    }
}

/// Multi-line `#define`, continuing every line with a backslash
fn push_define(out: &mut String, name: &str, body: &str) {
    out.push_str("#define ");
    out.push_str(name);
    out.push_str(" \\\n");
    out.push_str(&body.replace('\n', "\\\n"));
    out.push('\n');
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_first_line_first() {
        let template = "#version 330 core\nA TEMPLATE_SDFTYPES\nB TEMPLATE_SDSCENE\n";
        let merged = merge_template(template, "x;\ny;\n", "return 1.0;");
        assert_eq!(
            merged,
            "#version 330 core\n\
             #define TEMPLATE_SDFTYPES \\\nx;\\\ny;\\\n\n\
             #define TEMPLATE_SDSCENE \\\nreturn 1.0;\n\
             A TEMPLATE_SDFTYPES\nB TEMPLATE_SDSCENE\n"
        );
    }

    #[test]
    fn test_single_line_template() {
        let merged = merge_template("#version 450\n", "", "s");
        assert!(merged.starts_with("#version 450\n#define TEMPLATE_SDFTYPES"));
        assert!(merged.ends_with("#define TEMPLATE_SDSCENE \\\ns\n"));
    }

    #[test]
    fn test_default_template_is_valid() {
        let template = default_template();
        assert!(template.starts_with("#version"));
        validate_template(template).unwrap();
    }

    #[test]
    fn test_validate_rejects_missing_marker() {
        let err = validate_template("#version 330\nTEMPLATE_SDFTYPES\n").unwrap_err();
        assert_eq!(err, Error::Template("missing TEMPLATE_SDSCENE".to_string()));
        // Markers on the preserved first line do not count
        assert!(validate_template("TEMPLATE_SDFTYPES TEMPLATE_SDSCENE").is_err());
    }
}
