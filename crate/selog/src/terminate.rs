/// What `fatal*` and `panic*` do once their record has been written.
///
/// Both methods diverge. The default [`ProcessExit`] exits the process with
/// status 1 on fatal and panics on panic; tests inject an implementation that
/// panics in both cases so the outcome can be caught with
/// `std::panic::catch_unwind`.
pub trait Terminator: Send + Sync {
    fn fatal(&self, message: &str) -> !;

    fn panic(&self, message: &str) -> !;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn fatal(&self, _message: &str) -> ! {
        std::process::exit(1)
    }

    #[allow(clippy::panic)]
    fn panic(&self, message: &str) -> ! {
        panic!("{message}")
    }
}
