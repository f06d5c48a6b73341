mod readers;

use crate::value::Value;
use std::{
    any::{Any, TypeId, type_name},
    fmt,
    sync::OnceLock,
};

///
/// Value coercion
///
/// Converts opaque stored values into caller-requested static types through
/// an ordered chain of readers. Readers are pure, order-sensitive,
/// side-effect-free units; adding support for a new target type never
/// touches the condition algebra or the entity model.
///

///
/// CoerceError
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoerceError {
    Unsupported {
        source: &'static str,
        target: &'static str,
    },

    Conversion {
        source: &'static str,
        target: &'static str,
        message: String,
    },
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { source, target } => {
                write!(f, "no reader can produce {target} from {source}")
            }
            Self::Conversion {
                source,
                target,
                message,
            } => write!(f, "cannot convert {source} to {target}: {message}"),
        }
    }
}

impl std::error::Error for CoerceError {}

impl CoerceError {
    pub(crate) fn unsupported<T>(value: &Value) -> Self {
        Self::Unsupported {
            source: value.tag().label(),
            target: type_name::<T>(),
        }
    }

    pub(crate) fn conversion<T>(value: &Value, message: impl Into<String>) -> Self {
        Self::Conversion {
            source: value.tag().label(),
            target: type_name::<T>(),
            message: message.into(),
        }
    }
}

///
/// ValueReader
///
/// One entry in the coercion chain. The registry scans entries in
/// registration order and the first compatible entry wins; its result is
/// returned as-is.
///

pub trait ValueReader: Send + Sync {
    /// Whether this reader can produce the requested target type.
    fn is_compatible(&self, target: TypeId) -> bool;

    /// Produce the target type from the raw value. Only invoked after
    /// `is_compatible` returned true for `target`.
    fn read(&self, target: TypeId, value: &Value) -> Result<Box<dyn Any>, CoerceError>;
}

///
/// TypedReader
///
/// Adapter lifting a plain conversion function into the reader chain.
///

pub struct TypedReader<T> {
    convert: fn(&Value) -> Result<T, CoerceError>,
}

impl<T> TypedReader<T> {
    #[must_use]
    pub const fn new(convert: fn(&Value) -> Result<T, CoerceError>) -> Self {
        Self { convert }
    }
}

impl<T: Any> ValueReader for TypedReader<T> {
    fn is_compatible(&self, target: TypeId) -> bool {
        target == TypeId::of::<T>()
    }

    fn read(&self, _target: TypeId, value: &Value) -> Result<Box<dyn Any>, CoerceError> {
        (self.convert)(value).map(|v| Box::new(v) as Box<dyn Any>)
    }
}

///
/// ReaderRegistry
///
/// Ordered chain of readers. Populated once during process initialization
/// and read-only thereafter; reads take no lock.
///

pub struct ReaderRegistry {
    readers: Vec<Box<dyn ValueReader>>,
}

impl ReaderRegistry {
    /// Registry with no readers at all, not even the defaults.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Registry pre-populated with the built-in readers.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        readers::register_defaults(&mut registry);

        registry
    }

    /// Append a reader to the end of the chain.
    pub fn register(&mut self, reader: Box<dyn ValueReader>) -> &mut Self {
        self.readers.push(reader);
        self
    }

    /// Append a conversion function as a reader for `T`.
    pub fn register_fn<T: Any>(
        &mut self,
        convert: fn(&Value) -> Result<T, CoerceError>,
    ) -> &mut Self {
        self.register(Box::new(TypedReader::new(convert)))
    }

    /// Insert a reader ahead of every existing entry, so it shadows any
    /// built-in reader for the same target.
    pub fn register_first(&mut self, reader: Box<dyn ValueReader>) -> &mut Self {
        self.readers.insert(0, reader);
        self
    }

    /// Coerce `value` to `T`.
    ///
    /// The raw value itself short-circuits as an identity read when it
    /// already is the requested target; otherwise readers are scanned in
    /// registration order and the first compatible one decides.
    pub fn read<T: Any + Clone>(&self, value: &Value) -> Result<T, CoerceError> {
        let any: &dyn Any = value;
        if let Some(same) = any.downcast_ref::<T>() {
            return Ok(same.clone());
        }

        let target = TypeId::of::<T>();
        for reader in &self.readers {
            if reader.is_compatible(target) {
                let out = reader.read(target, value)?;

                return out.downcast::<T>().map(|v| *v).map_err(|_| {
                    CoerceError::conversion::<T>(value, "reader produced a mismatched type")
                });
            }
        }

        Err(CoerceError::unsupported::<T>(value))
    }

    /// Install this registry as the process-wide default.
    ///
    /// At most one installation is accepted, and only before the first
    /// coercion forces the defaults; the rejected registry is handed back.
    pub fn install(self) -> Result<(), Self> {
        GLOBAL.set(self)
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<ReaderRegistry> = OnceLock::new();

/// Process-wide registry; the built-in defaults apply unless a registry was
/// installed first.
pub fn global() -> &'static ReaderRegistry {
    GLOBAL.get_or_init(ReaderRegistry::new)
}

///
/// TESTS
///
