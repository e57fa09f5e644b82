#![no_std]
#![no_main]
#![feature(abi_x86_interrupt)]

extern crate rlibc;

use bootloader_api::{entry_point, BootInfo};
use core::panic::PanicInfo;
use log::{error, info, LevelFilter};
use screensaver::rng::XorShift32;
use screensaver::scene::SHAPE_COUNT;
use screensaver::{color, Engine, FrameBufferController, Scene};
use spin::Mutex;
use uart_16550::SerialPort;

use crate::{framebuffer::init_framebuffer, kernel::init_kernel};

mod display;
mod framebuffer;
mod interrupts;
mod kernel;
mod logger;

entry_point!(kernel_main);

const LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub static SERIAL: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(0x3F8) });

#[macro_export]
macro_rules! println {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        x86_64::instructions::interrupts::without_interrupts(|| {
            let mut serial = $crate::SERIAL.lock();
            let _ = writeln!(serial, $($arg)*);
        });
    }};
}

pub fn kernel_main(boot_info: &'static mut BootInfo) -> ! {
    SERIAL.lock().init();
    logger::init(LOG_LEVEL);

    let board = display::board_config();

    if let Err(e) = init_framebuffer(boot_info, &board.display) {
        println!("Framebuffer unavailable: {}", e);
        halt_loop();
    }

    if init_kernel().is_err() {
        println!("Kernel initialization failed!");
        halt_loop();
    }

    let controller = match unsafe {
        FrameBufferController::init(display::registers(), &board, color::BACKGROUND)
    } {
        Ok(controller) => controller,
        Err(e) => {
            error!("display configuration rejected: {}", e);
            halt_loop();
        }
    };

    let seed = unsafe { core::arch::x86_64::_rdtsc() };
    info!("scene seed {:#x}", seed);
    let scene = Scene::<SHAPE_COUNT>::random(&mut XorShift32::from_u64(seed), &board.display);

    let mut engine = Engine::new(controller, scene);
    engine.run(|_| true);

    halt_loop()
}

fn halt_loop() -> ! {
    loop {
        x86_64::instructions::hlt();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    let msg = info.message();
    let loc = info.location();
    println!("PANIC : {} | {:?}", msg, loc);

    x86_64::instructions::interrupts::disable();
    halt_loop()
}
