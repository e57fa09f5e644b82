/// Kernel initialization phases
use crate::interrupts::{self, interrupts::ticks, pic, pit};
use crate::kernel::status::{
    all_components_ready, for_each_component, register_component, update_component_status, InitStatus,
};
use crate::println;

/// Refresh rate of the emulated display.
pub const VSYNC_HZ: u32 = 60;

/// Busy-wait iterations allowed for the first timer tick to arrive.
const FIRST_TICK_SPINS: u64 = 500_000_000;

const PHASES: [(&str, fn() -> Result<(), &'static str>); 2] = [
    ("Interrupt System", init_interrupts),
    ("Vertical Sync", init_vsync),
];

/// Initialize kernel in proper order with error handling
pub fn init_kernel() -> Result<(), &'static str> {
    for (name, _) in PHASES {
        register_component(name);
    }
    println!("╔════════════════════════════════════════╗");
    println!("║       Screensaver Kernel Bring-up      ║");
    println!("╚════════════════════════════════════════╝\n");

    for (index, (name, init_fn)) in PHASES.into_iter().enumerate() {
        init_phase(index + 1, name, init_fn)?;
    }

    for_each_component(|c| println!("    {:<20} {}", c.name, c.status));
    if !all_components_ready() {
        return Err("component left uninitialized");
    }
    println!("\nKernel initialization complete!\n");
    Ok(())
}

fn init_phase(
    index: usize,
    name: &'static str,
    init_fn: fn() -> Result<(), &'static str>,
) -> Result<(), &'static str> {
    update_component_status(name, InitStatus::InProgress);
    println!("[{}/{}] Initializing {}...", index, PHASES.len(), name);

    match init_fn() {
        Ok(()) => {
            update_component_status(name, InitStatus::Completed);
            println!("    ✓ {} initialized successfully\n", name);
            Ok(())
        }
        Err(e) => {
            update_component_status(name, InitStatus::Failed(e));
            println!("    ✗ {} failed: {}\n", name, e);
            Err(e)
        }
    }
}

fn init_interrupts() -> Result<(), &'static str> {
    interrupts::init();
    pic::unmask_timer_only();
    Ok(())
}

fn init_vsync() -> Result<(), &'static str> {
    pit::set_frequency(VSYNC_HZ);
    x86_64::instructions::interrupts::enable();

    let start = ticks();
    for _ in 0..FIRST_TICK_SPINS {
        if ticks() != start {
            return Ok(());
        }
        core::hint::spin_loop();
    }
    Err("timer interrupt never fired")
}
