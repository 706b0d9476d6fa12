use std::collections::BTreeMap;

use serde::Serialize;

const ID_KEY: &str = "properties|id";
const NAME_KEY: &str = "properties|name";
const MD5_KEY: &str = "File|md5";

/// Flattened view of a `synapse show` dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SynapseRecord {
    pub entries: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

impl SynapseRecord {
    pub fn get(&self, category: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&format!("{category}|{key}"))
            .map(String::as_str)
    }
}

enum ShowLine<'a> {
    Blank,
    Header(&'a str),
    Entry { key: &'a str, value: Option<&'a str> },
}

fn classify_line(line: &str) -> ShowLine<'_> {
    if line.trim().is_empty() {
        return ShowLine::Blank;
    }
    if !line.starts_with(char::is_whitespace) {
        let category = line.split_once(':').map_or(line, |(head, _)| head);
        return ShowLine::Header(category);
    }
    match line.trim().split_once('=') {
        Some((key, value)) => {
            let value = value.trim();
            ShowLine::Entry {
                key: key.trim(),
                value: (!value.is_empty()).then_some(value),
            }
        }
        None => ShowLine::Entry {
            key: line.trim(),
            value: None,
        },
    }
}

/// Parses the indented `category:` / `key=value` output of `synapse show` into a flat
/// record keyed by `category|key`. A key's last line wins, and keys whose last line
/// has no value are dropped.
pub fn parse_synapse_show(text: &str) -> SynapseRecord {
    let (_, raw) = text.lines().fold(
        (String::new(), BTreeMap::<String, Option<String>>::new()),
        |(category, mut raw), line| match classify_line(line) {
            ShowLine::Blank => (category, raw),
            ShowLine::Header(next) => (next.to_string(), raw),
            ShowLine::Entry { key, value } => {
                raw.insert(format!("{category}|{key}"), value.map(str::to_string));
                (category, raw)
            }
        },
    );
    let entries = raw
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect::<BTreeMap<_, _>>();

    SynapseRecord {
        id: entries.get(ID_KEY).cloned(),
        name: entries.get(NAME_KEY).cloned(),
        md5: entries.get(MD5_KEY).cloned(),
        entries,
    }
}
