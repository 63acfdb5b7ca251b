//! Symbol identifiers and base reel sets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ReelError, ReelResult};

/// A visual symbol on a reel
///
/// Opaque to the geometry code; only equality matters. Keys are
/// `h1..h4` (high), `l1..l4` (low), `wild`, `scatter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbol {
    /// High paying symbol, 1-based rank
    High(u8),
    /// Low paying symbol, 1-based rank
    Low(u8),
    /// Wild
    Wild,
    /// Scatter
    Scatter,
}

impl Symbol {
    /// Every symbol of the classic set
    pub const CLASSIC: [Symbol; 10] = [
        Symbol::High(1),
        Symbol::High(2),
        Symbol::High(3),
        Symbol::High(4),
        Symbol::Low(1),
        Symbol::Low(2),
        Symbol::Low(3),
        Symbol::Low(4),
        Symbol::Wild,
        Symbol::Scatter,
    ];

    /// Short key (e.g. "h1", "wild")
    pub fn key(&self) -> String {
        match self {
            Symbol::High(n) => format!("h{}", n),
            Symbol::Low(n) => format!("l{}", n),
            Symbol::Wild => "wild".into(),
            Symbol::Scatter => "scatter".into(),
        }
    }

    /// Texture atlas frame name for this symbol
    pub fn atlas_frame(&self) -> String {
        format!("{}.png", self.key())
    }

    /// Wild or scatter
    pub fn is_special(&self) -> bool {
        matches!(self, Symbol::Wild | Symbol::Scatter)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for Symbol {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_suffix(".png").unwrap_or(&key);

        match key {
            "wild" => return Ok(Symbol::Wild),
            "scatter" => return Ok(Symbol::Scatter),
            _ => {}
        }

        let rank = |digits: &str| digits.parse::<u8>().ok().filter(|n| *n > 0);
        if let Some(n) = key.strip_prefix('h').and_then(rank) {
            return Ok(Symbol::High(n));
        }
        if let Some(n) = key.strip_prefix('l').and_then(rank) {
            return Ok(Symbol::Low(n));
        }
        Err(ReelError::UnknownSymbol(s.to_string()))
    }
}

impl TryFrom<String> for Symbol {
    type Error = ReelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.key()
    }
}

/// Parse a list of symbol keys
pub fn parse_symbols<S: AsRef<str>>(keys: &[S]) -> ReelResult<Vec<Symbol>> {
    keys.iter().map(|k| k.as_ref().parse()).collect()
}

/// Base reel strips, one per reel
///
/// Base strips are short; spin strips are built by cycling them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelSet {
    pub reels: Vec<Vec<Symbol>>,
}

impl ReelSet {
    /// Create from explicit strips
    pub fn new(reels: Vec<Vec<Symbol>>) -> Self {
        Self { reels }
    }

    /// Classic 5-reel set (lengths 8, 8, 9, 8, 8)
    pub fn classic() -> Self {
        use Symbol::{High as H, Low as L, Scatter as S, Wild as W};

        Self::new(vec![
            vec![L(1), H(1), S, L(2), W, H(2), L(3), H(3)],
            vec![H(1), L(2), L(1), H(2), W, S, L(4), H(3)],
            vec![L(1), L(2), H(1), H(2), S, W, L(3), H(3), L(4)],
            vec![H(1), L(1), H(2), S, L(2), W, L(3), H(3)],
            vec![L(2), H(1), L(3), H(2), S, W, L(1), H(4)],
        ])
    }

    /// Number of reels
    pub fn len(&self) -> usize {
        self.reels.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    /// Base strip for a reel
    pub fn base(&self, reel: usize) -> Option<&[Symbol]> {
        self.reels.get(reel).map(Vec::as_slice)
    }

    /// Build a `len`-long spin strip by cycling reel `reel`'s base strip
    /// starting at `start`.
    pub fn spin_strip(&self, reel: usize, len: usize, start: usize) -> ReelResult<Vec<Symbol>> {
        let base = self
            .base(reel)
            .ok_or_else(|| ReelError::InvalidParam(format!("no base strip for reel {}", reel)))?;
        if base.is_empty() {
            return Err(ReelError::InvalidParam(format!(
                "base strip for reel {} is empty",
                reel
            )));
        }

        Ok((0..len).map(|i| base[(start + i) % base.len()]).collect())
    }
}

impl Default for ReelSet {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_keys() {
        for symbol in Symbol::CLASSIC {
            assert_eq!(symbol.key().parse::<Symbol>().unwrap(), symbol);
        }
        assert_eq!(Symbol::High(3).atlas_frame(), "h3.png");
        assert_eq!("l2.png".parse::<Symbol>().unwrap(), Symbol::Low(2));
        assert_eq!("WILD".parse::<Symbol>().unwrap(), Symbol::Wild);
    }

    #[test]
    fn test_unknown_symbols() {
        assert!("h0".parse::<Symbol>().is_err());
        assert!("x1".parse::<Symbol>().is_err());
        assert!("".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_symbol_serde_as_key() {
        let json = serde_json::to_string(&vec![Symbol::Wild, Symbol::High(2)]).unwrap();
        assert_eq!(json, r#"["wild","h2"]"#);
        let back: Vec<Symbol> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Symbol::Wild, Symbol::High(2)]);
    }

    #[test]
    fn test_classic_set() {
        let set = ReelSet::classic();
        assert_eq!(set.len(), 5);
        let lens: Vec<usize> = set.reels.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![8, 8, 9, 8, 8]);
    }

    #[test]
    fn test_spin_strip_cycles_from_start() {
        let set = ReelSet::classic();
        let strip = set.spin_strip(0, 10, 6).unwrap();
        assert_eq!(strip[0], Symbol::Low(3));
        assert_eq!(strip[1], Symbol::High(3));
        assert_eq!(strip[2], Symbol::Low(1)); // Wraps
        assert_eq!(strip.len(), 10);
    }

    #[test]
    fn test_spin_strip_bad_reel() {
        let set = ReelSet::classic();
        assert!(set.spin_strip(5, 10, 0).is_err());
        assert!(ReelSet::new(vec![vec![]]).spin_strip(0, 10, 0).is_err());
    }
}
