use core::fmt;
use spin::Mutex;

const MAX_COMPONENTS: usize = 8;

/// Kernel initialization status tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed(&'static str),
}

/// Kernel component status
#[derive(Debug, Clone, Copy)]
pub struct ComponentStatus {
    pub name: &'static str,
    pub status: InitStatus,
}

static INIT_STATUS: Mutex<[Option<ComponentStatus>; MAX_COMPONENTS]> =
    Mutex::new([None; MAX_COMPONENTS]);

/// Track kernel component initialization. Silently ignored once the table
/// is full.
pub fn register_component(name: &'static str) {
    let mut table = INIT_STATUS.lock();
    if let Some(slot) = table.iter_mut().find(|slot| slot.is_none()) {
        *slot = Some(ComponentStatus {
            name,
            status: InitStatus::NotStarted,
        });
    }
}

pub fn update_component_status(name: &'static str, status: InitStatus) {
    let mut table = INIT_STATUS.lock();
    if let Some(comp) = table.iter_mut().flatten().find(|c| c.name == name) {
        comp.status = status;
    }
}

pub fn for_each_component(mut f: impl FnMut(&ComponentStatus)) {
    INIT_STATUS.lock().iter().flatten().for_each(|c| f(c));
}

pub fn all_components_ready() -> bool {
    let table = INIT_STATUS.lock();
    let mut registered = table.iter().flatten().peekable();
    registered.peek().is_some() && registered.all(|c| c.status == InitStatus::Completed)
}

impl fmt::Display for InitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStatus::NotStarted => write!(f, "Not Started"),
            InitStatus::InProgress => write!(f, "In Progress"),
            InitStatus::Completed => write!(f, "Completed"),
            InitStatus::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}
