use gl::types::GLenum;

// A context that was lost keeps reporting errors, so draining is capped.
const MAX_DRAINED_ERRORS: usize = 16;

pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

/// Pops pending errors until `next` reports `GL_NO_ERROR`, returning them.
pub fn drain_with(mut next: impl FnMut() -> GLenum) -> Vec<GLenum> {
    let mut errors = Vec::new();
    while errors.len() < MAX_DRAINED_ERRORS {
        match next() {
            gl::NO_ERROR => break,
            code => errors.push(code),
        }
    }
    errors
}

fn next_gl_error() -> GLenum {
    unsafe { gl::GetError() }
}

pub fn clear_errors() {
    drain_with(next_gl_error);
}

/// Logs every error raised by `call` and returns `true` when there were none.
pub fn log_errors(call: &str, file: &str, line: u32) -> bool {
    log_drained(drain_with(next_gl_error), call, file, line)
}

fn log_drained(errors: Vec<GLenum>, call: &str, file: &str, line: u32) -> bool {
    for code in &errors {
        log::error!(
            "[OpenGL Error] ({:#06x} {}): {} {}:{}",
            code,
            error_name(*code),
            call,
            file,
            line
        );
    }
    errors.is_empty()
}

/// Clears stale errors, runs `f`, then logs what it left in the queue.
/// The flag is `true` when `f` raised no error.
pub fn checked_with<T>(
    mut next_error: impl FnMut() -> GLenum,
    call: &str,
    file: &str,
    line: u32,
    f: impl FnOnce() -> T,
) -> (T, bool) {
    drain_with(&mut next_error);
    let result = f();
    let clean = log_drained(drain_with(&mut next_error), call, file, line);
    (result, clean)
}

pub fn checked<T>(call: &str, file: &str, line: u32, f: impl FnOnce() -> T) -> T {
    checked_with(next_gl_error, call, file, line, f).0
}

/// Runs a raw `gl::*` call, logging any error it leaves behind.
#[macro_export]
macro_rules! gl_call {
    ($call:expr) => {
        $crate::gl_check::checked(stringify!($call), file!(), line!(), || {
            #[allow(unused_unsafe)]
            unsafe {
                $call
            }
        })
    };
}
