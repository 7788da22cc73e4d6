use super::{EntryRecord, ResourceError};

/// Parse a `lexicon.tsv` document: `lemma<TAB>class[<TAB>tag,tag,...]` per line.
///
/// Blank lines and lines starting with `#` are skipped. Line numbers in
/// errors are 1-based.
pub fn parse_lexicon_tsv(text: &str) -> Result<Vec<EntryRecord>, ResourceError> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_err = |reason: &str| ResourceError::Parse {
            line: idx + 1,
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(parse_err("expected lemma and class separated by a tab"));
        }
        if fields.len() > 3 {
            return Err(parse_err("too many fields"));
        }

        let lemma = fields[0].trim();
        let class = fields[1].trim();
        if lemma.is_empty() {
            return Err(parse_err("empty lemma"));
        }
        if class.is_empty() {
            return Err(parse_err("empty paradigm class"));
        }

        let tags = fields
            .get(2)
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        entries.push(EntryRecord {
            lemma: lemma.to_string(),
            class: class.to_string(),
            tags,
        });
    }
    Ok(entries)
}
