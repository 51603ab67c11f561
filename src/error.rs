// License: MIT
// Copyright © 2026 The grid-flow-graph Authors

//! This module defines the `Error` struct and the `ErrorKind` enum, which are
//! used to represent errors that can occur in the library.

/// A macro for defining the `ErrorKind` enum, the `Display` implementation for
/// it, and the constructors for the `Error` struct.
macro_rules! ErrorKind {
    ($(
        ($kind:ident, $ctor:ident)
    ),*) => {
        /// The kind of error that occurred.
        #[derive(Debug, PartialEq)]
        pub(crate) enum ErrorKind {
            $(
                $kind,
            )*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$kind => write!(f, "{}", stringify!($kind)),
                    )*
                }
            }
        }

        /// Constructors for [`Error`].
        impl Error {
            $(
                #[doc = concat!(
                    "Creates a new [`Error`] with the `",
                    stringify!($kind),
                    "` kind and the given description."
                )]
                pub(crate) fn $ctor(desc: impl Into<String>) -> crate::Error {
                    Self {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (NodeNotFound, node_not_found),
    (Internal, internal),
    (InvalidConfig, invalid_config),
    (InvalidConnection, invalid_connection),
    (InvalidGraph, invalid_graph),
    (InvalidNode, invalid_node),
    (InvalidValue, invalid_value)
);

/// An error that can occur while building, editing or loading a
/// [GridGraph][crate::GridGraph], or while loading a
/// [GridConfig][crate::GridConfig].
///
/// Failing to serve a deficit is not an error: the optimizer reports it
/// through its [Optimization][crate::Optimization] result instead.
#[derive(Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.desc)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::node_not_found("Node L4 not found.").to_string(),
            "NodeNotFound: Node L4 not found."
        );
        assert_eq!(
            Error::invalid_config("`max neighbors` must be positive.").to_string(),
            "InvalidConfig: `max neighbors` must be positive."
        );
    }
}
