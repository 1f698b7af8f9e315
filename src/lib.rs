mod error;

pub mod cli;

#[cfg(target_os = "macos")]
mod privesc_darwin;
#[cfg(not(target_os = "macos"))]
mod privesc_unsupported;

use std::ffi::{CStr, CString, OsStr};

use tracing::{debug, warn};

pub use crate::error::{InstallError, OSStatus, Result, USAGE_EXIT_CODE};

#[cfg(target_os = "macos")]
pub use privesc_darwin::AuthorizationServices as SystemAuthority;
#[cfg(not(target_os = "macos"))]
pub use privesc_unsupported::UnsupportedAuthority as SystemAuthority;

/// Name of the right that allows running a tool with administrator privileges.
pub const RIGHT_EXECUTE: &CStr = c"system.privilege.admin";

/// A tool that may be launched with elevated privileges, and the exact number
/// of arguments it takes.
///
/// Descriptors cannot be built outside this crate; [`COPY_TOOL`] is the only one.
///
/// ```compile_fail
/// let shell = install_tool::ToolDescriptor {
///     path: c"/bin/sh",
///     arity: 2,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    path: &'static CStr,
    arity: usize,
}

/// The only privileged tool: `cp <source> <destination>`.
pub const COPY_TOOL: ToolDescriptor = ToolDescriptor {
    path: c"/bin/cp",
    arity: 2,
};

/// The rights an authorization session is upgraded with before executing a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RightsRequest {
    pub right: &'static CStr,
    /// Allow the service to show an authentication prompt.
    pub interaction_allowed: bool,
    /// Authenticate up front instead of on first use.
    pub pre_authorize: bool,
    /// Keep the granted right on the session.
    pub extend_rights: bool,
}

impl RightsRequest {
    /// Request for [`RIGHT_EXECUTE`], prompting the user if needed.
    pub fn execute() -> Self {
        Self {
            right: RIGHT_EXECUTE,
            interaction_allowed: true,
            pre_authorize: true,
            extend_rights: true,
        }
    }
}

/// A fully resolved invocation of a [`ToolDescriptor`].
///
/// Arguments are passed to the tool verbatim. The only checks are that the
/// argument count matches the descriptor and that no argument contains a NUL
/// byte, since the service takes C strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegedCommand {
    tool: ToolDescriptor,
    args: Vec<CString>,
}

impl PrivilegedCommand {
    /// Builds an invocation of `tool` with the given arguments.
    ///
    /// Only reachable through the fixed constructors such as [`copy`](Self::copy).
    ///
    /// # Errors
    /// - [`InstallError::ArgumentCount`] if the number of arguments differs from `tool.arity`.
    /// - [`InstallError::InvalidArgument`] if an argument contains a NUL byte.
    pub(crate) fn new<I, S>(tool: ToolDescriptor, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = args
            .into_iter()
            .map(|arg| to_cstring(arg.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if args.len() != tool.arity {
            return Err(InstallError::ArgumentCount {
                expected: tool.arity,
                found: args.len(),
            });
        }

        Ok(Self { tool, args })
    }

    /// Builds the privileged copy of `source` to `destination`.
    pub fn copy(source: impl AsRef<OsStr>, destination: impl AsRef<OsStr>) -> Result<Self> {
        Self::new(COPY_TOOL, [source.as_ref(), destination.as_ref()])
    }

    /// Absolute path of the tool.
    pub fn program(&self) -> &CStr {
        self.tool.path
    }

    pub fn args(&self) -> &[CString] {
        &self.args
    }
}

#[cfg(unix)]
fn to_cstring(arg: &OsStr) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;

    CString::new(arg.as_bytes())
        .map_err(|_| InstallError::InvalidArgument(arg.to_string_lossy().into_owned()))
}

#[cfg(not(unix))]
fn to_cstring(arg: &OsStr) -> Result<CString> {
    CString::new(arg.to_string_lossy().as_bytes())
        .map_err(|_| InstallError::InvalidArgument(arg.to_string_lossy().into_owned()))
}

/// The interactive authorization service.
///
/// Each method maps to one call of the underlying service and returns its raw
/// status on failure. [`Credential`] turns these into [`InstallError`]s.
pub trait Authority {
    /// Opaque session handle.
    type Handle: Copy;

    /// Opens a session with no rights and default flags.
    fn create(&self) -> std::result::Result<Self::Handle, OSStatus>;

    /// Upgrades the session with the requested right. May block on a user prompt.
    fn copy_rights(
        &self,
        handle: Self::Handle,
        request: &RightsRequest,
    ) -> std::result::Result<(), OSStatus>;

    /// Spawns the command with the session's privileges. Does not wait for it.
    fn execute(
        &self,
        handle: Self::Handle,
        command: &PrivilegedCommand,
    ) -> std::result::Result<(), OSStatus>;

    /// Releases the session.
    fn free(&self, handle: Self::Handle) -> std::result::Result<(), OSStatus>;
}

/// An open authorization session.
///
/// The session is released exactly once, when the credential is dropped.
pub struct Credential<'a, A: Authority> {
    authority: &'a A,
    handle: A::Handle,
}

impl<'a, A: Authority> Credential<'a, A> {
    /// Opens a session. Nothing has to be released when this fails.
    pub fn acquire(authority: &'a A) -> Result<Self> {
        let handle = authority.create().map_err(InstallError::AuthCreate)?;
        debug!("authorization session created");

        Ok(Self { authority, handle })
    }

    /// Adds the execute right to the session, prompting the user if needed.
    pub fn request_execute_right(&self) -> Result<()> {
        let request = RightsRequest::execute();
        debug!(right = ?request.right, "requesting rights");

        self.authority
            .copy_rights(self.handle, &request)
            .map_err(InstallError::AuthCopyRights)
    }

    /// Spawns `command` with elevated privileges.
    ///
    /// Only the spawn is checked; the tool's own exit status is not observed.
    pub fn execute(&self, command: &PrivilegedCommand) -> Result<()> {
        debug!(program = ?command.program(), args = ?command.args(), "executing with privileges");

        self.authority
            .execute(self.handle, command)
            .map_err(InstallError::AuthExec)
    }

    /// Releases the session now instead of at the end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl<A: Authority> Drop for Credential<'_, A> {
    fn drop(&mut self) {
        match self.authority.free(self.handle) {
            Ok(()) => debug!("authorization session released"),
            Err(status) => warn!(status, "failed to release authorization session"),
        }
    }
}

/// Acquires a session, adds the execute right and spawns `command`.
///
/// Stops at the first failing step. Once a session exists it is released
/// whatever the outcome.
///
/// # Example
///
/// ```no_run
/// use install_tool::{PrivilegedCommand, SystemAuthority};
///
/// let command = PrivilegedCommand::copy("/tmp/tool", "/usr/local/bin/tool")?;
/// install_tool::run(&SystemAuthority::default(), &command)?;
/// # Ok::<(), install_tool::InstallError>(())
/// ```
pub fn run<A: Authority>(authority: &A, command: &PrivilegedCommand) -> Result<()> {
    let credential = Credential::acquire(authority)?;
    credential.request_execute_right()?;
    credential.execute(command)
}
