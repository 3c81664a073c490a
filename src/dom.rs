//! Flag elements the switcher highlights and listens to.
//!
//! The markup is owned by the site: containers of a recognized class hold
//! image elements, each tagged with a language-code attribute. The switcher
//! only toggles the active class on them.

use crate::config::SwitcherConfig;
use crate::i18n::Language;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagId(usize);

#[derive(Debug, Clone)]
pub struct FlagElement {
    id: FlagId,
    attributes: HashMap<String, String>,
    classes: Vec<String>,
}

impl FlagElement {
    pub fn id(&self) -> FlagId {
        self.id
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The raw language-code attribute, as written in the markup.
    pub fn lang<'a>(&'a self, config: &SwitcherConfig) -> &'a str {
        self.attribute(&config.flag_attribute).unwrap_or("")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

#[derive(Debug, Clone)]
struct FlagContainer {
    class: String,
    flags: Vec<FlagElement>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    containers: Vec<FlagContainer>,
    next_id: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// One recognized container with a flag per supported language.
    pub fn from_registry(config: &SwitcherConfig) -> Self {
        let mut document = Self::new();
        let flags: Vec<(&str, &str)> = config
            .registry
            .list()
            .iter()
            .map(|lang| (lang.code, lang.native_name))
            .collect();

        let container = document.push_container(&config.container_class);
        for (code, native_name) in flags {
            let id = document.allocate_id();
            let mut attributes = HashMap::new();
            attributes.insert(config.flag_attribute.clone(), code.to_string());
            attributes.insert("alt".to_string(), native_name.to_string());
            document.containers[container].flags.push(FlagElement {
                id,
                attributes,
                classes: Vec::new(),
            });
        }
        document
    }

    /// Add a container of the given class holding flags with the given
    /// language attributes. Returns the new flags' ids in order.
    pub fn add_container(
        &mut self,
        config: &SwitcherConfig,
        class: &str,
        langs: &[&str],
    ) -> Vec<FlagId> {
        let container = self.push_container(class);
        langs
            .iter()
            .map(|lang| {
                let id = self.allocate_id();
                let mut attributes = HashMap::new();
                attributes.insert(config.flag_attribute.clone(), lang.to_string());
                self.containers[container].flags.push(FlagElement {
                    id,
                    attributes,
                    classes: Vec::new(),
                });
                id
            })
            .collect()
    }

    fn push_container(&mut self, class: &str) -> usize {
        self.containers.push(FlagContainer {
            class: class.to_string(),
            flags: Vec::new(),
        });
        self.containers.len() - 1
    }

    fn allocate_id(&mut self) -> FlagId {
        let id = FlagId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Flags inside recognized containers, in document order.
    pub fn flags<'a>(&'a self, config: &SwitcherConfig) -> impl Iterator<Item = &'a FlagElement> {
        let class = config.container_class.clone();
        self.containers
            .iter()
            .filter(move |c| c.class == class)
            .flat_map(|c| c.flags.iter())
    }

    pub fn flag(&self, config: &SwitcherConfig, id: FlagId) -> Option<&FlagElement> {
        self.flags(config).find(|flag| flag.id == id)
    }

    /// Mark every flag whose normalized attribute equals `language` as
    /// active and clear the marker from all others.
    pub fn highlight(&mut self, config: &SwitcherConfig, language: Language) {
        for container in &mut self.containers {
            if container.class != config.container_class {
                continue;
            }
            for flag in &mut container.flags {
                let flag_language = config.registry.normalize(flag.lang(config));
                if flag_language == language {
                    flag.add_class(&config.active_class);
                } else {
                    flag.remove_class(&config.active_class);
                }
            }
        }
    }

    /// Attribute values of the flags currently marked active.
    pub fn active_languages(&self, config: &SwitcherConfig) -> Vec<String> {
        self.flags(config)
            .filter(|flag| flag.has_class(&config.active_class))
            .map(|flag| flag.lang(config).to_string())
            .collect()
    }
}
