//! Restore task descriptor for the publication activity.
//!
//! Declares what the host backup/restore framework has to run and rewrite
//! when a publication is restored: the structure step, which text fields
//! carry encoded links, how those links decode, and how old log entries map
//! to the restored instance.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::error::CoreError;
use crate::types::DbId;

/// Maps ids from the backup to ids of the restored instance.
pub trait IdMapper {
    /// New id of `old_id` for the given mapping item (`course_module`,
    /// `publication`, ...), or `None` if it was not restored.
    fn mapped_id(&self, item: &str, old_id: DbId) -> Option<DbId>;
}

/// A boolean setting shown in the restore UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSetting {
    pub name: &'static str,
    pub default_enabled: bool,
}

/// A structure step reading one XML file of the backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureStep {
    pub name: &'static str,
    pub filename: &'static str,
}

/// Table fields whose content goes through the link decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeContent {
    pub table: &'static str,
    pub fields: &'static [&'static str],
    pub mapping: &'static str,
}

/// An encoded link (`$@NAME*id@$`) and the URL it restores to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRule {
    pub link_name: &'static str,
    /// URL path with `$1`, `$2`, ... placeholders, one per mapping.
    pub url_template: &'static str,
    pub mappings: &'static [&'static str],
}

impl DecodeRule {
    /// Replace every encoded link of this rule in `content`.
    ///
    /// Links whose ids cannot be mapped are left as they are.
    pub fn decode(&self, content: &str, base_url: &str, mapper: &dyn IdMapper) -> Result<String, CoreError> {
        let pattern = format!(r"\$@{}((?:\*\d+)+)@\$", regex::escape(self.link_name));
        let re = Regex::new(&pattern)
            .map_err(|e| CoreError::Internal(format!("Bad decode rule {}: {e}", self.link_name)))?;

        let decoded = re.replace_all(content, |caps: &Captures<'_>| {
            match self.restore_url(&caps[1], base_url, mapper) {
                Some(url) => url,
                None => {
                    tracing::warn!(link = %&caps[0], rule = self.link_name, "Unmapped link left encoded");
                    caps[0].to_string()
                }
            }
        });
        Ok(decoded.into_owned())
    }

    fn restore_url(&self, encoded_ids: &str, base_url: &str, mapper: &dyn IdMapper) -> Option<String> {
        let old_ids: Vec<DbId> = encoded_ids
            .split('*')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().ok())
            .collect::<Option<_>>()?;
        if old_ids.len() != self.mappings.len() {
            return None;
        }

        let mut url = self.url_template.to_string();
        // Highest index first so `$1` does not clobber `$10`.
        for (index, (item, old_id)) in self.mappings.iter().zip(&old_ids).enumerate().rev() {
            let new_id = mapper.mapped_id(item, *old_id)?;
            url = url.replace(&format!("${}", index + 1), &new_id.to_string());
        }
        Some(format!("{}{}", base_url.trim_end_matches('/'), url))
    }
}

/// Maps a legacy log entry of the activity onto the restored instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRule {
    pub module: &'static str,
    pub action: &'static str,
    /// URL with `{item}` placeholders.
    pub url_template: &'static str,
    /// Info field with `{item}` placeholders.
    pub info_template: &'static str,
}

impl LogRule {
    pub fn matches(&self, module: &str, action: &str) -> bool {
        self.module == module && self.action == action
    }

    /// Fill the url and info templates from the old ids of a log entry.
    ///
    /// Returns `None` when a placeholder has no old id or no mapping.
    pub fn restore(&self, old_ids: &HashMap<&str, DbId>, mapper: &dyn IdMapper) -> Option<(String, String)> {
        let url = fill_placeholders(self.url_template, old_ids, mapper)?;
        let info = fill_placeholders(self.info_template, old_ids, mapper)?;
        Some((url, info))
    }
}

fn fill_placeholders(template: &str, old_ids: &HashMap<&str, DbId>, mapper: &dyn IdMapper) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let end = start + rest[start..].find('}')?;
        let item = &rest[start + 1..end];
        let old_id = old_ids.get(item)?;
        let new_id = mapper.mapped_id(item, *old_id)?;
        out.push_str(&rest[..start]);
        out.push_str(&new_id.to_string());
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    Some(out)
}

/// What an activity registers with the restore framework.
pub trait ActivityRestoreTask {
    fn settings(&self) -> Vec<RestoreSetting> {
        Vec::new()
    }

    fn steps(&self) -> Vec<StructureStep>;

    fn decode_contents(&self) -> Vec<DecodeContent>;

    fn decode_rules(&self) -> Vec<DecodeRule>;

    /// Rules for the activity's own log entries.
    fn log_rules(&self) -> Vec<LogRule>;

    /// Rules applied to course-level log entries (no module instance).
    fn course_log_rules(&self) -> Vec<LogRule> {
        Vec::new()
    }

    /// Run every decode rule over `content`.
    fn decode_links(&self, content: &str, base_url: &str, mapper: &dyn IdMapper) -> Result<String, CoreError> {
        self.decode_rules()
            .iter()
            .try_fold(content.to_string(), |text, rule| rule.decode(&text, base_url, mapper))
    }
}

/// Restore task of the publication activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicationRestoreTask;

impl ActivityRestoreTask for PublicationRestoreTask {
    fn steps(&self) -> Vec<StructureStep> {
        vec![StructureStep {
            name: "publication_structure",
            filename: "publication.xml",
        }]
    }

    fn decode_contents(&self) -> Vec<DecodeContent> {
        vec![DecodeContent {
            table: "publication",
            fields: &["intro"],
            mapping: "publication",
        }]
    }

    fn decode_rules(&self) -> Vec<DecodeRule> {
        vec![
            DecodeRule {
                link_name: "PUBLICATIONVIEWBYID",
                url_template: "/mod/publication/view.php?id=$1",
                mappings: &["course_module"],
            },
            DecodeRule {
                link_name: "PUBLICATIONINDEX",
                url_template: "/mod/publication/index.php?id=$1",
                mappings: &["course_module"],
            },
        ]
    }

    fn log_rules(&self) -> Vec<LogRule> {
        ["add", "update", "view"]
            .into_iter()
            .map(|action| LogRule {
                module: "publication",
                action,
                url_template: "view.php?id={course_module}",
                info_template: "{publication}",
            })
            .collect()
    }
}
