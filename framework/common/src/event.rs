/// Events the application shell reacts to, regardless of where they originated
/// (window, Ctrl-C handler, engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplicationEvent {
    Exit,
}
