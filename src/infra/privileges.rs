use crate::infra::error::AppError;

#[cfg(unix)]
pub fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_privileged() -> bool {
    false
}

pub fn ensure_unprivileged(allow_root: bool) -> Result<(), AppError> {
    check(is_privileged(), allow_root)
}

fn check(privileged: bool, allow_root: bool) -> Result<(), AppError> {
    if privileged && !allow_root {
        return Err(AppError::RunningAsRoot);
    }

    Ok(())
}
