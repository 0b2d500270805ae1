//! Chemical formula splitting: `"A3B12CDe32"` → `A:3, B:12, C:1, De:32`.
//!
//! Rules
//! - A component starts at an ASCII uppercase letter and runs to the next one.
//! - Its element is the text before the first digit run, with whitespace removed.
//! - Its count is that first digit run, or 1 when there is none.
//! - Text before the first uppercase letter is ignored, so `"2345"` has no components.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

fn component_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z][^A-Z]*").expect("static pattern"))
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("static pattern"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub element: String,
    pub count: u32,
}

/// Ordered components of a formula.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composition {
    pub components: Vec<Component>,
}

impl Composition {
    pub fn elements(&self) -> impl Iterator<Item = &str> + '_ {
        self.components.iter().map(|c| c.element.as_str())
    }

    pub fn counts(&self) -> impl Iterator<Item = u32> + '_ {
        self.components.iter().map(|c| c.count)
    }

    /// Counts normalized to sum to 1 (empty for an empty composition).
    pub fn fractions(&self) -> Vec<f64> {
        let total: f64 = self.counts().map(f64::from).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        self.counts().map(|c| f64::from(c) / total).collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{}", c.element, c.count)?;
        }
        Ok(())
    }
}

/// Split `formula` into components.
pub fn parse_formula(formula: &str) -> Result<Composition> {
    let mut components = Vec::new();
    for m in component_re().find_iter(formula) {
        let text = m.as_str();
        let (name, count) = match digits_re().find(text) {
            Some(d) => {
                let count = d.as_str().parse::<u32>().map_err(|_| Error::InvalidCount {
                    component: text.trim().to_string(),
                    digits: d.as_str().to_string(),
                })?;
                (&text[..d.start()], count)
            }
            None => (text, 1),
        };
        components.push(Component {
            element: name.split_whitespace().collect(),
            count,
        });
    }
    Ok(Composition { components })
}

/// Space-joined elements and counts, e.g. `("A B C De", "3 12 1 32")`.
pub fn composition_concentration(formula: &str) -> Result<(String, String)> {
    let comp = parse_formula(formula)?;
    let elements = comp.elements().collect::<Vec<_>>().join(" ");
    let counts = comp
        .counts()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    Ok((elements, counts))
}
