use crate::model::{Asset, Component};

use super::Snippet;

pub(super) fn snippets(component: &Component, asset: Option<&Asset>) -> Vec<Snippet> {
    let (Some(group), Some(version)) = (component.group.as_deref(), component.version.as_deref()) else {
        return Vec::new();
    };
    let name = component.name.as_str();
    let extension = asset.and_then(|a| a.extension()).unwrap_or("jar");

    let mut maven = format!(
        "<dependency>\n  <groupId>{group}</groupId>\n  <artifactId>{name}</artifactId>\n  <version>{version}</version>\n"
    );
    if extension != "jar" {
        maven.push_str(&format!("  <type>{extension}</type>\n"));
    }
    maven.push_str("</dependency>");

    let coords = if extension == "jar" {
        format!("{group}:{name}:{version}")
    } else {
        format!("{group}:{name}:{version}@{extension}")
    };

    vec![
        Snippet::new("Apache Maven", maven),
        Snippet::new("Gradle Groovy DSL", format!("implementation '{coords}'")),
        Snippet::new("Gradle Kotlin DSL", format!("implementation(\"{coords}\")")),
        Snippet::new(
            "Scala SBT",
            format!("libraryDependencies += \"{group}\" % \"{name}\" % \"{version}\""),
        ),
        Snippet::new(
            "Apache Ivy",
            format!("<dependency org=\"{group}\" name=\"{name}\" rev=\"{version}\" />"),
        ),
        Snippet::new(
            "Groovy Grape",
            format!("@Grapes(\n  @Grab(group='{group}', module='{name}', version='{version}')\n)"),
        ),
        Snippet::new("Leiningen", format!("[{group}/{name} \"{version}\"]")),
    ]
}
