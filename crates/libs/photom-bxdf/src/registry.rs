use crate::{laws::BUILTIN_LAWS, LawError, ReflectanceLaw};
use ahash::AHashMap;

/// Name-indexed collection of reflectance laws.
///
/// Each name maps to exactly one law; registering a second law under an
/// existing name fails instead of shadowing the first. Laws are kept in
/// registration order.
#[derive(Default)]
pub struct LawRegistry {
    laws: Vec<Box<dyn ReflectanceLaw>>,
    index: AHashMap<String, usize>,
}

impl LawRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self { Self::default() }

    /// Creates a registry holding the built-in laws.
    pub fn builtin() -> Result<Self, LawError> {
        Self::new().with_laws(
            BUILTIN_LAWS
                .iter()
                .map(|law| Box::new(*law) as Box<dyn ReflectanceLaw>),
        )
    }

    /// Registers every law of `laws`, stopping at the first duplicate.
    pub fn with_laws<I>(mut self, laws: I) -> Result<Self, LawError>
    where
        I: IntoIterator<Item = Box<dyn ReflectanceLaw>>,
    {
        for law in laws {
            self.register(law)?;
        }
        Ok(self)
    }

    /// Registers a law.
    ///
    /// # Errors
    ///
    /// Returns [`LawError::DuplicateLaw`] if a law with the same name is
    /// already registered; the registry is left unchanged.
    pub fn register(&mut self, law: Box<dyn ReflectanceLaw>) -> Result<(), LawError> {
        let name = law.name().to_string();
        if self.index.contains_key(&name) {
            return Err(LawError::DuplicateLaw(name));
        }
        log::trace!("Registering law {} (implemented: {})", name, law.is_implemented());
        self.index.insert(name, self.laws.len());
        self.laws.push(law);
        Ok(())
    }

    /// Returns the law registered under `name`.
    pub fn get(&self, name: &str) -> Result<&dyn ReflectanceLaw, LawError> {
        self.index
            .get(name)
            .map(|&i| self.laws[i].as_ref())
            .ok_or_else(|| LawError::UnknownLaw(name.to_string()))
    }

    /// Whether a law is registered under `name`.
    pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

    /// Iterates over the registered laws in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ReflectanceLaw> + '_ {
        self.laws.iter().map(|law| law.as_ref())
    }

    /// Names of the registered laws in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ { self.iter().map(|law| law.name()) }

    /// Names of the registered laws without a computation.
    pub fn unimplemented(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter(|law| !law.is_implemented()).map(|law| law.name())
    }

    /// Number of registered laws.
    pub fn len(&self) -> usize { self.laws.len() }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool { self.laws.is_empty() }
}
