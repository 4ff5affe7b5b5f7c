use super::*;

impl PermissionSource for RemoteClient {
    fn fetch_permissions(&self) -> Result<Vec<Permission>> {
        self.get_json("/permissions", "permissions")
    }
}

impl StateSource for RemoteClient {
    fn fetch_state(&self) -> Result<ServerState> {
        self.get_json("/state", "server state")
    }
}
