use std::cmp::Ordering;

use crate::version::version_tokens;

/// Orders raw version strings rather than parsed versions, so that it also works for bucket
///  directory names and file names that are not full versions.
///
/// Both strings are split on '.' and '-' and compared token by token:
///  * tokens that are both numeric compare as integers
///  * a numeric token is older than a non-numeric one
///  * non-numeric tokens compare lexically ("RC" < "SNAPSHOT")
///
/// If all shared tokens are equal, the string with fewer tokens is older ("2.0" < "2.0.1"). `None`
///  is older than any version.
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionComparator;
impl VersionComparator {
    pub fn compare(&self, v1: &str, v2: &str) -> Ordering {
        if v1 == v2 {
            return Ordering::Equal;
        }

        let tokens1 = version_tokens(v1);
        let tokens2 = version_tokens(v2);

        for (t1, t2) in tokens1.iter().zip(tokens2.iter()) {
            if t1 == t2 {
                continue;
            }

            // Mixed numeric/text tokens are not compared lexically: "2" < "10" < "1a" < "2" would
            //  cycle, and sort_by needs a total order. Numeric first agrees with lexical order for
            //  letter-led tokens like "RC" or "SNAPSHOT".
            let ordering = match (t1.parse::<u64>(), t2.parse::<u64>()) {
                (Ok(n1), Ok(n2)) => n1.cmp(&n2),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => t1.cmp(t2),
            };

            // NB: numerically equal tokens like "01" and "1" do not decide the order, the next
            //  token does - returning Equal here would hide a difference in later tokens
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        tokens1.len().cmp(&tokens2.len())
    }
}

pub fn compare_versions(v1: Option<&str>, v2: Option<&str>) -> Ordering {
    match (v1, v2) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(v1), Some(v2)) => VersionComparator.compare(v1, v2),
    }
}

/// Sorts newest first
pub fn sort_descending<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by(|v1, v2| VersionComparator.compare(v2.as_ref(), v1.as_ref()));
}

pub fn latest<'a, S: AsRef<str>>(versions: &'a [S]) -> Option<&'a S> {
    versions.iter()
        .max_by(|v1, v2| VersionComparator.compare(v1.as_ref(), v2.as_ref()))
}
