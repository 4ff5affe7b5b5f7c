use crate::model::{Asset, Component};

use super::Snippet;

fn npm_name(component: &Component) -> String {
    match component.group.as_deref() {
        Some(scope) if !scope.is_empty() => format!("@{}/{}", scope.trim_start_matches('@'), component.name),
        _ => component.name.clone(),
    }
}

pub(super) fn npm(component: &Component, _asset: Option<&Asset>) -> Vec<Snippet> {
    let name = npm_name(component);
    let Some(version) = component.version.as_deref() else {
        return vec![Snippet::new("npm", format!("npm install {name}"))];
    };
    vec![
        Snippet::new("npm", format!("npm install {name}@{version}")),
        Snippet::new("package.json", format!("\"{name}\": \"{version}\"")),
    ]
}

pub(super) fn pypi(component: &Component, _asset: Option<&Asset>) -> Vec<Snippet> {
    let name = &component.name;
    let Some(version) = component.version.as_deref() else {
        return vec![Snippet::new("pip", format!("pip install {name}"))];
    };
    vec![
        Snippet::new("pip", format!("pip install {name}=={version}")),
        Snippet::new("requirements.txt", format!("{name}=={version}")),
    ]
}

pub(super) fn nuget(component: &Component, _asset: Option<&Asset>) -> Vec<Snippet> {
    let Some(version) = component.version.as_deref() else {
        return Vec::new();
    };
    let name = &component.name;
    vec![
        Snippet::new(
            "Package Manager",
            format!("Install-Package {name} -Version {version}"),
        ),
        Snippet::new(".NET CLI", format!("dotnet add package {name} --version {version}")),
        Snippet::new(
            "PackageReference",
            format!("<PackageReference Include=\"{name}\" Version=\"{version}\" />"),
        ),
    ]
}

pub(super) fn rubygems(component: &Component, _asset: Option<&Asset>) -> Vec<Snippet> {
    let name = &component.name;
    match component.version.as_deref() {
        Some(version) => vec![
            Snippet::new("gem", format!("gem install {name} -v {version}")),
            Snippet::new("Gemfile", format!("gem '{name}', '{version}'")),
        ],
        None => vec![
            Snippet::new("gem", format!("gem install {name}")),
            Snippet::new("Gemfile", format!("gem '{name}'")),
        ],
    }
}

pub(super) fn docker(component: &Component, _asset: Option<&Asset>) -> Vec<Snippet> {
    let tag = component.version.as_deref().unwrap_or("latest");
    let image = match component.group.as_deref() {
        Some(ns) if !ns.is_empty() => format!("{ns}/{}", component.name),
        _ => component.name.clone(),
    };
    vec![Snippet::new("Docker", format!("docker pull {image}:{tag}"))]
}
