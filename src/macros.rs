pub use enclose::*;

/// Builds a computed property function.
///
/// ```ignore
/// let full = computed!((suffix) vm, cx => {
///     Ok(format!("{}{}", vm.get("name", cx)?, suffix).into())
/// });
/// ```
#[macro_export]
macro_rules! computed {
    (( $($d_tt:tt)* ) $vm:ident, $cx:ident => $($b:tt)*) => {
        $crate::macros::enclose!(($( $d_tt )*) move |$vm: &$crate::ViewModel, $cx: &$crate::Evaluation| -> $crate::Result<$crate::Value> { $($b)* })
    };
    ($vm:ident, $cx:ident => $($b:tt)*) => {
        move |$vm: &$crate::ViewModel, $cx: &$crate::Evaluation| -> $crate::Result<$crate::Value> { $($b)* }
    };
}

/// Builds a method for the method table.
#[macro_export]
macro_rules! method {
    (( $($d_tt:tt)* ) $vm:ident, $event:ident => $($b:tt)*) => {
        $crate::macros::enclose!(($( $d_tt )*) move |$vm: &$crate::ViewModel, $event: &$crate::Event| -> $crate::Result<()> { $($b)* })
    };
    ($vm:ident, $event:ident => $($b:tt)*) => {
        move |$vm: &$crate::ViewModel, $event: &$crate::Event| -> $crate::Result<()> { $($b)* }
    };
}

/// Creates a watcher on a view-model.
#[macro_export]
macro_rules! watch {
    ($vm:expr, $path:expr, ( $($d_tt:tt)* ) $new:ident, $old:ident => $($b:tt)*) => {
        $vm.watch($path, $crate::macros::enclose!(($( $d_tt )*) move |$new: &$crate::Value, $old: &$crate::Value| -> $crate::Result<()> { $($b)* }))
    };
    ($vm:expr, $path:expr, $new:ident, $old:ident => $($b:tt)*) => {
        $vm.watch($path, move |$new: &$crate::Value, $old: &$crate::Value| -> $crate::Result<()> { $($b)* })
    };
}
