//! Temporary naming
//!
//! Front ends name their temporaries with a fixed prefix and a counter
//! (`T0`, `T1`, ...). Those names never escape a block, so they are not
//! live-out and never chosen as result names. The reconstructor synthesizes
//! its own temporaries with a separate prefix (`RT0`, `RT1`, ...).

use std::collections::HashSet;

/// Recognizes temporaries and hands out fresh reconstruction names
#[derive(Debug, Clone)]
pub struct TempNaming {
    prefixes: Vec<String>,
    reconstruction_prefix: String,
}

impl TempNaming {
    pub fn new(prefixes: Vec<String>, reconstruction_prefix: String) -> Self {
        Self {
            prefixes,
            reconstruction_prefix,
        }
    }

    /// Returns true if `name` is a prefix followed by one or more digits
    pub fn is_temporary(&self, name: &str) -> bool {
        self.prefixes
            .iter()
            .chain(std::iter::once(&self.reconstruction_prefix))
            .any(|prefix| {
                name.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            })
    }

    /// Start a name generator that avoids every name in `reserved`
    pub fn generator(&self, reserved: HashSet<String>) -> FreshNames {
        FreshNames {
            prefix: self.reconstruction_prefix.clone(),
            next: 0,
            reserved,
        }
    }
}

impl Default for TempNaming {
    fn default() -> Self {
        Self::new(vec!["T".to_string(), "t".to_string()], "RT".to_string())
    }
}

/// Generator of reconstruction temporaries for one block
#[derive(Debug, Clone)]
pub struct FreshNames {
    prefix: String,
    next: usize,
    reserved: HashSet<String>,
}

impl FreshNames {
    /// Next unused name
    pub fn next_name(&mut self) -> String {
        loop {
            let name = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if self.reserved.insert(name.clone()) {
                return name;
            }
        }
    }
}
