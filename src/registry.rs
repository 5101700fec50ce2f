//! Named registry of schema constructors.
//!
//! A registry is assembled from a list of [`KindProvider`]s, each
//! instantiated against one [`Context`] (base contract + error factory).
//! Kinds can be filtered at creation time and added later with
//! [`Registry::extend_with`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::collections::ArraySchema;
use crate::combinators::UnionSchema;
use crate::error::{DefaultErrorFactory, ErrorFactory, SchemaError};
use crate::object::ObjectSchema;
use crate::primitives::{BooleanSchema, DateSchema, EnumSchema, NumberSchema, StringSchema};
use crate::schema::{BaseContract, Context, SchemaRef, StandardContract};
use crate::value::Value;

/// Argument passed to a registry constructor.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Schema(SchemaRef),
    Field(String, SchemaRef),
}

impl Arg {
    pub fn field(name: impl Into<String>, schema: SchemaRef) -> Self {
        Arg::Field(name.into(), schema)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<SchemaRef> for Arg {
    fn from(schema: SchemaRef) -> Self {
        Arg::Schema(schema)
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "Value({})", v),
            Arg::Schema(s) => write!(f, "Schema({})", s.type_name()),
            Arg::Field(name, s) => write!(f, "Field({}: {})", name, s.type_name()),
        }
    }
}

/// A schema constructor bound to a context.
pub type Constructor = Arc<dyn Fn(Vec<Arg>) -> Result<SchemaRef, SchemaError> + Send + Sync>;

/// Plugin point for schema kinds.
///
/// `instantiate` is called once per registry, with the registry's context,
/// and returns the constructor stored under the kind's name.
pub trait KindProvider: Send + Sync {
    fn name(&self) -> &str;

    fn instantiate(&self, ctx: &Context) -> Constructor;
}

fn bad_arguments(kind: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::BadArguments {
        kind: kind.to_string(),
        reason: reason.into(),
    }
}

fn no_arguments(kind: &'static str, args: &[Arg]) -> Result<(), SchemaError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(bad_arguments(kind, format!("takes no arguments, got {}", args.len())))
    }
}

macro_rules! scalar_kind {
    ($provider:ident, $name:literal, $schema:ident) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $provider;

        impl KindProvider for $provider {
            fn name(&self) -> &str {
                $name
            }

            fn instantiate(&self, ctx: &Context) -> Constructor {
                let ctx = ctx.clone();
                Arc::new(move |args: Vec<Arg>| -> Result<SchemaRef, SchemaError> {
                    no_arguments($name, &args)?;
                    Ok(Arc::new($schema::new(ctx.clone())) as SchemaRef)
                })
            }
        }
    };
}

scalar_kind!(StringKind, "string", StringSchema);
scalar_kind!(NumberKind, "number", NumberSchema);
scalar_kind!(BooleanKind, "bool", BooleanSchema);
scalar_kind!(DateKind, "date", DateSchema);

/// `enumeration(values...)`, or `enumeration(object)` to allow the object's values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumerationKind;

impl KindProvider for EnumerationKind {
    fn name(&self) -> &str {
        "enumeration"
    }

    fn instantiate(&self, ctx: &Context) -> Constructor {
        let ctx = ctx.clone();
        Arc::new(move |args: Vec<Arg>| -> Result<SchemaRef, SchemaError> {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                match arg {
                    Arg::Value(v) => values.push(v),
                    other => {
                        return Err(bad_arguments(
                            "enumeration",
                            format!("expected values, got {:?}", other),
                        ))
                    }
                }
            }
            let schema = match values.as_slice() {
                [Value::Object(map)] => EnumSchema::from_object(ctx.clone(), map.clone()),
                _ => EnumSchema::new(ctx.clone(), values),
            };
            Ok(Arc::new(schema) as SchemaRef)
        })
    }
}

/// `array()` or `array(element)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayKind;

impl KindProvider for ArrayKind {
    fn name(&self) -> &str {
        "array"
    }

    fn instantiate(&self, ctx: &Context) -> Constructor {
        let ctx = ctx.clone();
        Arc::new(move |mut args: Vec<Arg>| -> Result<SchemaRef, SchemaError> {
            let schema = ArraySchema::new(ctx.clone());
            let schema = match (args.pop(), args.is_empty()) {
                (None, _) => schema,
                (Some(Arg::Schema(element)), true) => schema.of_shared(element),
                _ => {
                    return Err(bad_arguments(
                        "array",
                        "expects at most one element schema",
                    ))
                }
            };
            Ok(Arc::new(schema) as SchemaRef)
        })
    }
}

/// `object(fields...)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectKind;

impl KindProvider for ObjectKind {
    fn name(&self) -> &str {
        "object"
    }

    fn instantiate(&self, ctx: &Context) -> Constructor {
        let ctx = ctx.clone();
        Arc::new(move |args: Vec<Arg>| -> Result<SchemaRef, SchemaError> {
            let mut schema = ObjectSchema::new(ctx.clone());
            for arg in args {
                match arg {
                    Arg::Field(name, field) => schema = schema.field_shared(name, field),
                    other => {
                        return Err(bad_arguments(
                            "object",
                            format!("expected fields, got {:?}", other),
                        ))
                    }
                }
            }
            Ok(Arc::new(schema) as SchemaRef)
        })
    }
}

/// `union(alternatives...)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionKind;

impl KindProvider for UnionKind {
    fn name(&self) -> &str {
        "union"
    }

    fn instantiate(&self, ctx: &Context) -> Constructor {
        let ctx = ctx.clone();
        Arc::new(move |args: Vec<Arg>| -> Result<SchemaRef, SchemaError> {
            let mut schema = UnionSchema::new(ctx.clone());
            for arg in args {
                match arg {
                    Arg::Schema(alt) => schema = schema.or_shared(alt),
                    other => {
                        return Err(bad_arguments(
                            "union",
                            format!("expected schemas, got {:?}", other),
                        ))
                    }
                }
            }
            Ok(Arc::new(schema) as SchemaRef)
        })
    }
}

/// The built-in kinds: string, number, bool, date, enumeration, array, object, union.
pub fn builtin_kinds() -> Vec<Arc<dyn KindProvider>> {
    vec![
        Arc::new(StringKind),
        Arc::new(NumberKind),
        Arc::new(BooleanKind),
        Arc::new(DateKind),
        Arc::new(EnumerationKind),
        Arc::new(ArrayKind),
        Arc::new(ObjectKind),
        Arc::new(UnionKind),
    ]
}

/// Options for [`create_instance`].
///
/// # Example
/// ```
/// use vld_chain::registry::{create_instance, RegistryOptions};
///
/// let registry = create_instance(RegistryOptions::new().include(["string", "number"])).unwrap();
/// assert!(registry.schemas().get("string").is_some());
/// assert!(registry.schemas().get("date").is_none());
/// ```
#[derive(Clone, Default)]
pub struct RegistryOptions {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    base_contract: Option<Arc<dyn BaseContract>>,
    error_factory: Option<Arc<dyn ErrorFactory>>,
    kinds: Option<Vec<Arc<dyn KindProvider>>>,
}

impl RegistryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire in only the named kinds.
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Wire in every kind except the named ones.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn base_contract(mut self, base: Arc<dyn BaseContract>) -> Self {
        self.base_contract = Some(base);
        self
    }

    pub fn error_factory(mut self, errors: Arc<dyn ErrorFactory>) -> Self {
        self.error_factory = Some(errors);
        self
    }

    /// Replace the built-in provider list.
    pub fn kinds(mut self, kinds: Vec<Arc<dyn KindProvider>>) -> Self {
        self.kinds = Some(kinds);
        self
    }
}

/// Kind name to constructor namespace of a [`Registry`].
///
/// Besides the dynamic [`get`](Schemas::get) / [`create`](Schemas::create),
/// typed accessors return the concrete built-in builders, or `None` when
/// that kind was filtered out.
#[derive(Clone)]
pub struct Schemas {
    ctx: Context,
    constructors: BTreeMap<String, Constructor>,
}

impl Schemas {
    pub fn get(&self, name: &str) -> Option<&Constructor> {
        self.constructors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered kind names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Call the constructor registered under `name`.
    pub fn create(&self, name: &str, args: Vec<Arg>) -> Result<SchemaRef, SchemaError> {
        let constructor = self
            .get(name)
            .ok_or_else(|| SchemaError::UnknownKind(name.to_string()))?;
        constructor(args)
    }

    fn typed<T>(&self, name: &str, build: impl FnOnce(Context) -> T) -> Option<T> {
        self.contains(name).then(|| build(self.ctx.clone()))
    }

    pub fn string(&self) -> Option<StringSchema> {
        self.typed("string", StringSchema::new)
    }

    pub fn number(&self) -> Option<NumberSchema> {
        self.typed("number", NumberSchema::new)
    }

    pub fn boolean(&self) -> Option<BooleanSchema> {
        self.typed("bool", BooleanSchema::new)
    }

    pub fn date(&self) -> Option<DateSchema> {
        self.typed("date", DateSchema::new)
    }

    pub fn enumeration<I, V>(&self, values: I) -> Option<EnumSchema>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.typed("enumeration", |ctx| EnumSchema::new(ctx, values))
    }

    pub fn enumeration_of<K, V, I>(&self, entries: I) -> Option<EnumSchema>
    where
        I: IntoIterator<Item = (K, V)>,
        V: Into<Value>,
    {
        self.typed("enumeration", |ctx| EnumSchema::from_object(ctx, entries))
    }

    pub fn array(&self) -> Option<ArraySchema> {
        self.typed("array", ArraySchema::new)
    }

    pub fn object(&self) -> Option<ObjectSchema> {
        self.typed("object", ObjectSchema::new)
    }

    pub fn union(&self) -> Option<UnionSchema> {
        self.typed("union", UnionSchema::new)
    }
}

/// A context plus the constructors built against it.
#[derive(Clone)]
pub struct Registry {
    schemas: Schemas,
}

impl Registry {
    pub fn schemas(&self) -> &Schemas {
        &self.schemas
    }

    pub fn context(&self) -> &Context {
        &self.schemas.ctx
    }

    /// Instantiate `provider` against this registry's context and register
    /// it under `name`, replacing any kind already registered there.
    pub fn extend_with<P>(&mut self, name: impl Into<String>, provider: P) -> &mut Self
    where
        P: KindProvider + 'static,
    {
        let name = name.into();
        tracing::debug!(kind = %name, provider = provider.name(), "extending schema registry");
        let constructor = provider.instantiate(&self.schemas.ctx);
        self.schemas.constructors.insert(name, constructor);
        self
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.schemas.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Build a registry from `options`.
///
/// Fails with [`SchemaError::ConflictingFilters`] when both `include` and
/// `exclude` are given. Names in the filters that match no provider are
/// ignored.
pub fn create_instance(options: RegistryOptions) -> Result<Registry, SchemaError> {
    let RegistryOptions {
        include,
        exclude,
        base_contract,
        error_factory,
        kinds,
    } = options;

    if include.is_some() && exclude.is_some() {
        return Err(SchemaError::ConflictingFilters);
    }

    let ctx = Context::new(
        base_contract.unwrap_or_else(|| Arc::new(StandardContract)),
        error_factory.unwrap_or_else(|| Arc::new(DefaultErrorFactory)),
    );

    let wanted = |name: &str| match (&include, &exclude) {
        (Some(include), _) => include.iter().any(|n| n == name),
        (_, Some(exclude)) => !exclude.iter().any(|n| n == name),
        _ => true,
    };

    let constructors = kinds
        .unwrap_or_else(builtin_kinds)
        .into_iter()
        .filter(|provider| wanted(provider.name()))
        .map(|provider| (provider.name().to_string(), provider.instantiate(&ctx)))
        .collect::<BTreeMap<_, _>>();

    tracing::debug!(
        kinds = ?constructors.keys().collect::<Vec<_>>(),
        "schema registry created"
    );

    Ok(Registry {
        schemas: Schemas { ctx, constructors },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_and_exclude_conflict() {
        let err = create_instance(RegistryOptions::new().include(["string"]).exclude(["number"]))
            .unwrap_err();
        assert_eq!(err, SchemaError::ConflictingFilters);
    }

    #[test]
    fn default_registry_has_every_builtin() {
        let registry = create_instance(RegistryOptions::new()).unwrap();
        let names: Vec<_> = registry.schemas().names().collect();
        assert_eq!(
            names,
            ["array", "bool", "date", "enumeration", "number", "object", "string", "union"]
        );
    }

    #[test]
    fn scalar_constructors_reject_arguments() {
        let registry = create_instance(RegistryOptions::new()).unwrap();
        let err = registry
            .schemas()
            .create("string", vec![Arg::Value(Value::from(1))])
            .err()
            .unwrap();
        assert!(matches!(err, SchemaError::BadArguments { .. }));
    }
}
