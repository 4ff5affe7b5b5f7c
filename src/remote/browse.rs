use super::*;

impl BrowseSource for RemoteClient {
    fn repositories(&self) -> Result<Vec<Repository>> {
        self.get_json("/repositories", "repositories")
    }

    fn components(&self, repository: &str) -> Result<Vec<Component>> {
        let path = format!("/repositories/{}/components", urlencoding::encode(repository));
        self.get_json(&path, "components")
    }

    fn assets(&self, component_id: &str) -> Result<Vec<Asset>> {
        let path = format!("/components/{}/assets", urlencoding::encode(component_id));
        self.get_json(&path, "assets")
    }
}
