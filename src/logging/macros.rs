//! Leveled logging macros for `NamedLogger`.
//!
//! Unlike the plain methods, the macros also record the name of the
//! enclosing function and accept `format!` arguments. Each evaluates to the
//! `Result` of the dispatch.
//!
//! ```ignore
//! let log = NamedLogger::create("net", "/var/log/app")?;
//! log_info!(log, "listening on {}", addr)?;
//! log_error_with!(log, &err, "accept failed")?;
//! ```

/// Call site of the macro invocation, including the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! __call_site {
    () => {
        $crate::CallSite {
            file: ::std::option::Option::Some(::std::file!()),
            function: ::std::option::Option::Some($crate::__function_name!()),
            line: ::std::option::Option::Some(::std::line!()),
        }
    };
}

#[macro_export]
macro_rules! log_at {
    ($logger:expr, $lvl:expr, $($arg:tt)+) => {{
        let __msg = ::std::format!($($arg)+);
        $logger.log_at($lvl, &__msg, $crate::__call_site!())
    }};
}

#[macro_export]
macro_rules! log_debug { ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::Debug, $($arg)+) } }

#[macro_export]
macro_rules! log_info { ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::Info, $($arg)+) } }

#[macro_export]
macro_rules! log_warning { ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::Warning, $($arg)+) } }

#[macro_export]
macro_rules! log_error { ($logger:expr, $($arg:tt)+) => { $crate::log_at!($logger, $crate::Level::Error, $($arg)+) } }

/// `ERROR` record with an error's cause chain appended
#[macro_export]
macro_rules! log_error_with {
    ($logger:expr, $err:expr, $($arg:tt)+) => {{
        let __msg = ::std::format!($($arg)+);
        $logger.error_with_at(&__msg, $err, $crate::__call_site!())
    }};
}
