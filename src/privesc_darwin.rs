use std::{ffi::c_char, ptr};

use security_framework_sys::authorization::{
    AuthorizationCopyRights, AuthorizationCreate, AuthorizationExecuteWithPrivileges,
    AuthorizationFlags, AuthorizationFree, AuthorizationItem, AuthorizationItemSet,
    AuthorizationRef, errAuthorizationSuccess, kAuthorizationFlagDefaults,
    kAuthorizationFlagExtendRights, kAuthorizationFlagInteractionAllowed,
    kAuthorizationFlagPreAuthorize,
};

use crate::error::OSStatus;
use crate::{Authority, PrivilegedCommand, RightsRequest};

fn check(status: OSStatus) -> Result<(), OSStatus> {
    if status == errAuthorizationSuccess {
        Ok(())
    } else {
        Err(status)
    }
}

fn rights_flags(request: &RightsRequest) -> AuthorizationFlags {
    let mut flags = kAuthorizationFlagDefaults;
    if request.interaction_allowed {
        flags |= kAuthorizationFlagInteractionAllowed;
    }
    if request.pre_authorize {
        flags |= kAuthorizationFlagPreAuthorize;
    }
    if request.extend_rights {
        flags |= kAuthorizationFlagExtendRights;
    }
    flags
}

/// macOS Authorization Services.
///
/// Prompts through the system authentication dialog and launches tools with
/// `AuthorizationExecuteWithPrivileges`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizationServices;

impl Authority for AuthorizationServices {
    type Handle = AuthorizationRef;

    fn create(&self) -> Result<AuthorizationRef, OSStatus> {
        let mut handle: AuthorizationRef = ptr::null_mut();

        // SAFETY: null rights and environment mean "empty"; handle is a valid out pointer.
        let status = unsafe {
            AuthorizationCreate(
                ptr::null_mut(),
                ptr::null_mut(),
                kAuthorizationFlagDefaults,
                &mut handle,
            )
        };

        check(status).map(|()| handle)
    }

    fn copy_rights(
        &self,
        handle: AuthorizationRef,
        request: &RightsRequest,
    ) -> Result<(), OSStatus> {
        let mut item = AuthorizationItem {
            name: request.right.as_ptr(),
            valueLength: 0,
            value: ptr::null_mut(),
            flags: 0,
        };
        let rights = AuthorizationItemSet {
            count: 1,
            items: &mut item,
        };

        // SAFETY: handle came from AuthorizationCreate and has not been freed;
        // item and rights outlive the call.
        let status = unsafe {
            AuthorizationCopyRights(
                handle,
                &rights,
                ptr::null_mut(),
                rights_flags(request),
                ptr::null_mut(),
            )
        };

        check(status)
    }

    fn execute(
        &self,
        handle: AuthorizationRef,
        command: &PrivilegedCommand,
    ) -> Result<(), OSStatus> {
        let mut argv: Vec<*mut c_char> = command
            .args()
            .iter()
            .map(|arg| arg.as_ptr().cast_mut())
            .collect();
        argv.push(ptr::null_mut());

        // SAFETY: argv is NULL-terminated and its strings are borrowed from
        // `command`, which outlives the call. The service does not write to them.
        let status = unsafe {
            AuthorizationExecuteWithPrivileges(
                handle,
                command.program().as_ptr(),
                kAuthorizationFlagDefaults,
                argv.as_mut_ptr(),
                ptr::null_mut(),
            )
        };

        check(status)
    }

    fn free(&self, handle: AuthorizationRef) -> Result<(), OSStatus> {
        // SAFETY: called once per handle, from Credential's Drop.
        check(unsafe { AuthorizationFree(handle, kAuthorizationFlagDefaults) })
    }
}
