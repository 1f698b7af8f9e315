use crate::error::OSStatus;
use crate::{Authority, PrivilegedCommand, RightsRequest};

/// `errAuthorizationInternal`: the service is not available on this platform.
pub const ERR_AUTHORIZATION_INTERNAL: OSStatus = -60008;

/// Stand-in used on targets without macOS Authorization Services.
///
/// Session creation always fails, so nothing is ever prompted for or executed.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedAuthority;

impl Authority for UnsupportedAuthority {
    type Handle = ();

    fn create(&self) -> Result<(), OSStatus> {
        Err(ERR_AUTHORIZATION_INTERNAL)
    }

    fn copy_rights(&self, _handle: (), _request: &RightsRequest) -> Result<(), OSStatus> {
        Err(ERR_AUTHORIZATION_INTERNAL)
    }

    fn execute(&self, _handle: (), _command: &PrivilegedCommand) -> Result<(), OSStatus> {
        Err(ERR_AUTHORIZATION_INTERNAL)
    }

    fn free(&self, _handle: ()) -> Result<(), OSStatus> {
        Ok(())
    }
}
