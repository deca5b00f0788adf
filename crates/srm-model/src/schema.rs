//! Record schemas: ordered field lists with typed setters and getters.
//!
//! A [`Schema`] replaces late-bound "set property by name" dispatch. Each
//! [`Field`] carries its declared [`ScalarKind`] and two closures generated
//! from ordinary Rust field access, and the schema owns the factory used to
//! create blank records.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ModelError, Result};
use crate::value::{Scalar, ScalarKind, Value};

type Setter<R> = Box<dyn Fn(&mut R, Value) -> std::result::Result<(), String> + Send + Sync>;
type Getter<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;
type Factory<R> = Box<dyn Fn() -> R + Send + Sync>;

/// One field of a record schema.
pub struct Field<R> {
    name: String,
    kind: ScalarKind,
    nullable: bool,
    set: Setter<R>,
    get: Getter<R>,
}

impl<R: 'static> Field<R> {
    /// Declares a statically typed field.
    ///
    /// The kind and nullability come from `T`.
    pub fn new<T, S, G>(name: impl Into<String>, set: S, get: G) -> Self
    where
        T: Scalar,
        S: Fn(&mut R, T) + Send + Sync + 'static,
        G: for<'a> Fn(&'a R) -> &'a T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: T::KIND,
            nullable: T::NULLABLE,
            set: Box::new(move |record: &mut R, value: Value| {
                set(record, T::from_value(value)?);
                Ok(())
            }),
            get: Box::new(move |record: &R| get(record).to_value()),
        }
    }

    /// Declares a field whose kind is only known at runtime.
    pub fn dynamic<S, G>(
        name: impl Into<String>,
        kind: ScalarKind,
        nullable: bool,
        set: S,
        get: G,
    ) -> Self
    where
        S: Fn(&mut R, Value) -> std::result::Result<(), String> + Send + Sync + 'static,
        G: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind,
            nullable,
            set: Box::new(set),
            get: Box::new(get),
        }
    }
}

impl<R> Field<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Stores an already coerced value into `record`.
    pub fn assign(&self, record: &mut R, value: Value) -> std::result::Result<(), String> {
        (self.set)(record, value)
    }

    /// Reads the field's current value from `record`.
    pub fn read(&self, record: &R) -> Value {
        (self.get)(record)
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

/// Ordered field list of a record type plus the factory for blank records.
pub struct Schema<R> {
    fields: Vec<Field<R>>,
    factory: Factory<R>,
}

impl<R: 'static> Schema<R> {
    /// Creates an empty schema whose blank records come from `factory`.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            fields: Vec::new(),
            factory: Box::new(factory),
        }
    }

    /// Appends a statically typed field (builder style).
    #[must_use]
    pub fn field<T, S, G>(mut self, name: impl Into<String>, set: S, get: G) -> Self
    where
        T: Scalar,
        S: Fn(&mut R, T) + Send + Sync + 'static,
        G: for<'a> Fn(&'a R) -> &'a T + Send + Sync + 'static,
    {
        self.fields.push(Field::new(name, set, get));
        self
    }
}

impl<R: Default + 'static> Schema<R> {
    /// Creates an empty schema using `R::default` as the factory.
    pub fn with_default() -> Self {
        Self::new(R::default)
    }
}

impl<R> Schema<R> {
    /// Appends a prepared field (builder style).
    #[must_use]
    pub fn with_field(mut self, field: Field<R>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: Field<R>) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }

    /// Position of the first field named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Creates a blank record through the factory.
    pub fn instantiate(&self) -> R {
        (self.factory)()
    }

    /// Rejects empty and duplicate field names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(ModelError::EmptyName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// A type the mapper can populate from a grid row.
pub trait Record: Sized + 'static {
    /// Builds the schema; called once per mapping call.
    fn schema() -> Schema<Self>;
}

/// Implements [`Record`] for a struct with a `Default` impl.
///
/// Fields are listed in column order. A field can carry a different column
/// name with `as "Name"`.
///
/// ```
/// use srm_model::{Record, record_schema};
///
/// #[derive(Default)]
/// struct Order {
///     id: u32,
///     customer: String,
///     total: Option<f64>,
/// }
///
/// record_schema!(Order {
///     id: u32,
///     customer as "Customer Name": String,
///     total: Option<f64>,
/// });
///
/// assert_eq!(Order::schema().field_names(), vec!["id", "Customer Name", "total"]);
/// ```
#[macro_export]
macro_rules! record_schema {
    ($record:ty { $($field:ident $(as $name:literal)? : $scalar:ty),+ $(,)? }) => {
        impl $crate::Record for $record {
            fn schema() -> $crate::Schema<Self> {
                $crate::Schema::<Self>::with_default()
                    $(
                        .field::<$scalar, _, _>(
                            $crate::__field_name!($field $(, $name)?),
                            |record, value| record.$field = value,
                            |record| &record.$field,
                        )
                    )+
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $name:literal) => {
        $name
    };
}
