//! Name-scope remapping for parameters imported from legacy checkpoints.
//!
//! Decoder graphs were historically built under numbered `decoder` name
//! scopes (`decoder/`, `decoder_1/`, ...), while inference graphs expect the
//! same parameters under `rnn/` — except the vocabulary-projection (logits)
//! parameters, which live at the top level. Exported names may also carry a
//! trailing `:0` output suffix.

use std::collections::HashMap;

/// Rewrites every `decoder/` or `decoder_<n>/` scope segment in `name` with
/// `replacement`, and strips one trailing `:0` when present.
fn strip_decoder_scopes(name: &str, replacement: &str) -> String {
    let mut remapped = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(pos) = rest.find("decoder") {
        let (head, tail) = rest.split_at(pos);
        remapped.push_str(head);
        let after = &tail["decoder".len()..];

        // Scope segments look like `decoder/` or `decoder_<digits>/`.
        let matched_len = if after.starts_with('/') {
            Some("decoder/".len())
        } else if let Some(numbered) = after.strip_prefix('_') {
            let digit_count = numbered.chars().take_while(char::is_ascii_digit).count();
            if digit_count > 0 && numbered[digit_count..].starts_with('/') {
                Some("decoder_".len() + digit_count + 1)
            } else {
                None
            }
        } else {
            None
        };

        match matched_len {
            Some(len) => {
                remapped.push_str(replacement);
                rest = &tail[len..];
            }
            None => {
                remapped.push_str("decoder");
                rest = after;
            }
        }
    }
    remapped.push_str(rest);

    match remapped.strip_suffix(":0") {
        Some(stripped) => stripped.to_string(),
        None => remapped,
    }
}

/// Maps remapped parameter names back to the names they carried in the
/// checkpoint.
///
/// Names containing both `decoder` and `logits` lose their decoder scopes
/// entirely; every other name has them replaced with `rnn/`.
pub fn remap_decoder_name_scope<I, S>(names: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut remapped = HashMap::new();
    for name in names {
        let name = name.as_ref();
        let new_name = if name.contains("decoder") && name.contains("logits") {
            strip_decoder_scopes(name, "")
        } else {
            strip_decoder_scopes(name, "rnn/")
        };
        remapped.insert(new_name, name.to_string());
    }
    remapped
}
