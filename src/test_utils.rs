//! Builder-style fixture for tests. Entities are addressed back by name or
//! title, which keeps test setup readable without threading ids through.

use uuid::Uuid;

use crate::api::CourseApi;

pub struct CourseFixture {
    pub api: CourseApi,
}

impl Default for CourseFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseFixture {
    pub fn new() -> Self {
        Self {
            api: CourseApi::new(),
        }
    }

    pub fn with_module(mut self, name: &str) -> Self {
        self.api.create_module(name).unwrap();
        self
    }

    /// Adds a link to the named module, or to the unassigned pool.
    pub fn with_link(mut self, module: Option<&str>, title: &str, url: &str) -> Self {
        let scope = module.map(|name| self.module_id(name));
        self.api.add_link(scope, title, url).unwrap();
        self
    }

    pub fn with_file(mut self, module: Option<&str>, title: &str, file_name: &str) -> Self {
        let scope = module.map(|name| self.module_id(name));
        self.api
            .add_file(scope, title, file_name, 1024, "application/pdf")
            .unwrap();
        self
    }

    pub fn module_id(&self, name: &str) -> Uuid {
        self.api
            .state()
            .modules
            .iter()
            .find(|m| m.name == name)
            .unwrap_or_else(|| panic!("no module named {:?} in fixture", name))
            .id
    }

    pub fn resource_id(&self, title: &str) -> Uuid {
        self.api
            .state()
            .resources
            .iter()
            .find(|r| r.title == title)
            .unwrap_or_else(|| panic!("no resource titled {:?} in fixture", title))
            .id
    }
}
