use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use hitproxy_core::error::HitProxyError;

use crate::store::HitRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Hits,
    Path,
}

/// Attribute name with an optional `-` prefix for descending order,
/// e.g. `-hits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    pub fn compare(&self, a: &HitRecord, b: &HitRecord) -> Ordering {
        let ord = match self.field {
            SortField::Hits => a.hits.cmp(&b.hits),
            SortField::Path => a.path.cmp(&b.path),
        };
        let ord = if self.descending { ord.reverse() } else { ord };
        // ties: path ascending, keeps listings stable across refreshes
        ord.then_with(|| a.path.cmp(&b.path))
    }
}

impl FromStr for SortKey {
    type Err = HitProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let field = match name {
            "hits" => SortField::Hits,
            "path" => SortField::Path,
            _ => {
                return Err(HitProxyError::InvalidConfiguration(format!(
                    "dashboard.sort_by must be one of hits, -hits, path, -path (got {s:?})"
                )))
            }
        };
        Ok(Self { field, descending })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.field {
            SortField::Hits => "hits",
            SortField::Path => "path",
        };
        if self.descending {
            write!(f, "-{name}")
        } else {
            f.write_str(name)
        }
    }
}
