/// Maps skill codes to human readable names.
///
/// The numeric core never needs a name; registries only decorate diagnostics.
pub trait SkillRegistry {
    fn name(&self, code: u32) -> Option<&str>;
}

/// A registry backed by a list of names indexed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillNames {
    names: Vec<String>,
}

impl SkillNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl SkillRegistry for SkillNames {
    fn name(&self, code: u32) -> Option<&str> {
        self.names.get(code as usize).map(String::as_str)
    }
}
