use super::Namespace;
use crate::backing_store::traits::BackingStore;
use std::fmt;

/// What a name resolves to inside a namespace.
///
/// The variant is decided solely by the presence of the name's link marker.
pub enum Entry<S: BackingStore> {
    Value(Vec<u8>),
    Namespace(Namespace<S>),
}

impl<S: BackingStore> Entry<S> {
    pub fn is_namespace(&self) -> bool {
        matches!(self, Self::Namespace(_))
    }

    pub fn as_value(&self) -> Option<&[u8]> {
        match self {
            Self::Value(value) => Some(value),
            Self::Namespace(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Vec<u8>> {
        match self {
            Self::Value(value) => Some(value),
            Self::Namespace(_) => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace<S>> {
        match self {
            Self::Namespace(namespace) => Some(namespace),
            Self::Value(_) => None,
        }
    }

    pub fn into_namespace(self) -> Option<Namespace<S>> {
        match self {
            Self::Namespace(namespace) => Some(namespace),
            Self::Value(_) => None,
        }
    }
}

impl<S: BackingStore> Clone for Entry<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Namespace(namespace) => Self::Namespace(namespace.clone()),
        }
    }
}

impl<S: BackingStore> fmt::Debug for Entry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Namespace(namespace) => f.debug_tuple("Namespace").field(namespace).finish(),
        }
    }
}

impl<S: BackingStore> fmt::Display for Entry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(&String::from_utf8_lossy(value)),
            Self::Namespace(namespace) => fmt::Display::fmt(namespace, f),
        }
    }
}
