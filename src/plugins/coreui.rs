use crate::conditions::Condition;
use crate::model::{Feature, Mode, ViewSpec};
use crate::snippets::{Generator, builtin_generators};

use super::Plugin;

/// Permission prefix of the repository administration drilldown.
pub const REPOSITORIES_PERMISSION: &str = "nexus:repositories";

/// The core console: browse pages, administration and account features.
pub struct CoreUi;

impl Plugin for CoreUi {
    fn name(&self) -> &str {
        "coreui"
    }

    fn features(&self) -> Vec<Feature> {
        let mut out = browse_features();
        out.extend(admin_features());
        out.extend(user_features());
        out
    }

    fn snippet_generators(&self) -> Vec<(&'static str, Generator)> {
        builtin_generators()
    }
}

fn permitted(id: &str) -> Condition {
    Condition::permitted(id)
}

fn browse_features() -> Vec<Feature> {
    vec![
        Feature::new("browse/welcome", "Welcome", Mode::Browse)
            .weight(10)
            .view(ViewSpec::new("welcome"))
            .icon("home")
            .description("Overview of the repository manager")
            .public(),
        Feature::new("browse/search", "Search", Mode::Browse)
            .weight(20)
            .view(ViewSpec::new("search"))
            .icon("search")
            .description("Search for components")
            .condition(permitted("nexus:search:read")),
        Feature::new("browse/browse", "Browse", Mode::Browse)
            .weight(30)
            .view(ViewSpec::loading("browse"))
            .icon("database")
            .description("Browse assets and components")
            .public(),
        Feature::new("browse/upload", "Upload", Mode::Browse)
            .weight(40)
            .view(ViewSpec::new("upload"))
            .icon("upload")
            .description("Upload content to the repository")
            .condition(permitted("nexus:component:add")),
    ]
}

fn admin_features() -> Vec<Feature> {
    vec![
        Feature::new("admin/repository", "Repository", Mode::Admin)
            .weight(10)
            .group()
            .description("Repository administration"),
        Feature::new("admin/repository/repositories", "Repositories", Mode::Admin)
            .weight(10)
            .view(ViewSpec::loading("repositories"))
            .icon("database")
            .description("Manage repositories")
            .condition(permitted("nexus:repositories:read")),
        Feature::new("admin/repository/blobstores", "Blob Stores", Mode::Admin)
            .weight(20)
            .icon("hdd")
            .description("Manage blob stores")
            .condition(permitted("nexus:blobstores:read")),
        Feature::new("admin/security", "Security", Mode::Admin)
            .weight(20)
            .group()
            .description("Security administration"),
        Feature::new("admin/security/roles", "Roles", Mode::Admin)
            .weight(20)
            .description("Manage roles")
            .condition(permitted("nexus:roles:read")),
        Feature::new("admin/security/users", "Users", Mode::Admin)
            .weight(30)
            .icon("users")
            .description("Manage users")
            .condition(permitted("nexus:users:read").and(permitted("nexus:roles:read"))),
        Feature::new("admin/security/ldap", "LDAP", Mode::Admin)
            .weight(40)
            .description("Manage LDAP server configurations")
            .condition(permitted("nexus:ldap:read")),
        Feature::new("admin/system", "System", Mode::Admin)
            .weight(30)
            .group()
            .description("System administration"),
        Feature::new("admin/system/tasks", "Tasks", Mode::Admin)
            .icon("clock")
            .description("Manage scheduled tasks")
            .condition(permitted("nexus:tasks:read")),
        Feature::new("admin/system/capabilities", "Capabilities", Mode::Admin)
            .description("Manage capabilities")
            .condition(permitted("nexus:capabilities:read")),
        Feature::new("admin/system/licensing", "Licensing", Mode::Admin)
            .description("Manage the product license")
            .condition(Condition::edition("PRO").and(permitted("nexus:licensing:read"))),
        Feature::new("admin/iq", "IQ Server", Mode::Admin)
            .weight(40)
            .description("Connection to the IQ server")
            .condition(Condition::capability("clm").and(permitted("nexus:settings:read"))),
        Feature::new("admin/support", "Support", Mode::Admin)
            .weight(50)
            .group()
            .description("Support tools"),
        Feature::new("admin/support/logging", "Logging", Mode::Admin)
            .description("Control logging verbosity")
            .condition(permitted("nexus:logging:read")),
        Feature::new("admin/support/systeminformation", "System Information", Mode::Admin)
            .description("Show system information")
            .condition(permitted("nexus:atlas:read").or(permitted("nexus:*"))),
    ]
}

fn user_features() -> Vec<Feature> {
    vec![
        Feature::new("user/account", "Account", Mode::User)
            .icon("user")
            .description("Manage your account"),
        Feature::new("user/usertoken", "User Token", Mode::User)
            .weight(110)
            .description("Access your user token")
            .condition(Condition::capability("usertoken")),
    ]
}
