//! YAML processing utilities

use anyhow::{Context, Result};
use serde::Serialize;
use yaml_rust_davvid::{yaml::Hash, Yaml, YamlEmitter};

/// Serializes a view to YAML, emitting multi-line strings as block scalars.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let value = serde_yaml::to_value(data).context("Failed to serialize to serde value")?;

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter
        .dump(&to_emitter_value(&value))
        .context("Failed to emit YAML")?;

    Ok(output)
}

fn to_emitter_value(value: &serde_yaml::Value) -> Yaml {
    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(*b),
        serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Yaml::Integer(i),
            (None, Some(f)) => Yaml::Real(f.to_string()),
            // u64 beyond i64::MAX
            (None, None) => Yaml::String(n.to_string()),
        },
        serde_yaml::Value::String(s) => Yaml::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Yaml::Array(seq.iter().map(to_emitter_value).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut hash = Hash::new();
            for (k, v) in map {
                hash.insert(to_emitter_value(k), to_emitter_value(v));
            }
            Yaml::Hash(hash)
        }
        serde_yaml::Value::Tagged(tagged) => to_emitter_value(&tagged.value),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::diff;

    const SAMPLE: &str = "\
diff --git a/notes.txt b/notes.txt
--- a/notes.txt
+++ b/notes.txt
@@ -1,2 +1,2 @@
 keep
-old
+new
";

    #[test]
    fn keeps_field_order() {
        let files = diff::parse(SAMPLE);
        let yaml = to_yaml(&files).unwrap();

        let old_path = yaml.find("oldPath").unwrap();
        let new_path = yaml.find("newPath").unwrap();
        let hunks = yaml.find("hunks").unwrap();
        assert!(old_path < new_path && new_path < hunks);
        assert!(yaml.contains("type: del"));
    }

    #[test]
    fn multiline_strings_use_block_scalars() {
        #[derive(Serialize)]
        struct Note {
            body: String,
        }

        let yaml = to_yaml(&Note {
            body: "first line\nsecond line".to_string(),
        })
        .unwrap();
        assert!(yaml.contains("body: |"));
        assert!(yaml.contains("second line"));
    }
}
