// Logging shims over `tracing`, all under the `rowvirt_table` target. Without the `tracing`
// feature they expand to nothing and their arguments are never evaluated.

#[cfg(feature = "tracing")]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "rowvirt_table", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! vtrace {
    ($($tt:tt)*) => { vlog!(trace, $($tt)*) };
}

macro_rules! vdebug {
    ($($tt:tt)*) => { vlog!(debug, $($tt)*) };
}

macro_rules! vwarn {
    ($($tt:tt)*) => { vlog!(warn, $($tt)*) };
}
