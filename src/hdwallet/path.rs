/*
    Child indices and derivation paths.

    Paths are written as "m/44'/0'/0'/0/1". The leading "m" is optional
    and "h" or "H" may be used instead of "'" to mark a hardened child.
*/

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Raw indices at or above this are hardened
pub const HARDENED_OFFSET: u32 = 1 << 31;

/**
    Index of a child key. The inner value is the position
    within its half of the index space and is always below 2^31.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChildIndex {
    Normal(u32),
    Hardened(u32)
}

impl ChildIndex {
    pub fn normal(index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET { return Err(Error::InvalidIndex(index)) }
        Ok(Self::Normal(index))
    }

    pub fn hardened(index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET { return Err(Error::InvalidIndex(index)) }
        Ok(Self::Hardened(index))
    }

    /// Splits a 32 bit serialized index into its half and position
    pub fn from_raw(raw: u32) -> Self {
        if raw >= HARDENED_OFFSET {
            Self::Hardened(raw - HARDENED_OFFSET)
        } else {
            Self::Normal(raw)
        }
    }

    /// The 32 bit index as it is hashed and serialized
    pub fn to_raw(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => i | HARDENED_OFFSET
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /**
        The following index in the same half, used to skip an index
        that produced an invalid key. None at the end of the range.
    */
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Normal(i) => Self::normal(i.checked_add(1)?).ok(),
            Self::Hardened(i) => Self::hardened(i.checked_add(1)?).ok()
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{}", i),
            Self::Hardened(i) => write!(f, "{}'", i)
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (digits, hardened) = match s.strip_suffix(|c: char| c == '\'' || c == 'h' || c == 'H') {
            Some(d) => (d, true),
            None => (s, false)
        };

        //u32::from_str would accept a leading '+'
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPath(s.to_string()))
        }
        let index: u32 = digits.parse().map_err(|_| Error::InvalidPath(s.to_string()))?;

        if hardened { Self::hardened(index) } else { Self::normal(index) }
    }
}

impl From<ChildIndex> for u32 {
    fn from(index: ChildIndex) -> u32 {
        index.to_raw()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    pub children: Vec<ChildIndex>
}

impl DerivationPath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChildIndex> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_hardened(&self) -> bool {
        self.children.iter().any(ChildIndex::is_hardened)
    }

    /// A new path with index appended
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut children = self.children.clone();
        children.push(index);
        Self { children }
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        if path.is_empty() || path == "m" { return Ok(Self::empty()) }

        let rest = match path.strip_prefix("m/") {
            Some(r) => r,
            None if path.starts_with('m') => return Err(Error::InvalidPath(path.to_string())),
            None => path
        };

        let children = rest
            .split('/')
            .map(|c| c.parse::<ChildIndex>().map_err(|_| Error::InvalidPath(path.to_string())))
            .collect::<Result<Vec<ChildIndex>>>()?;

        Ok(Self { children })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.children {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(children: Vec<ChildIndex>) -> Self {
        Self { children }
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = std::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
