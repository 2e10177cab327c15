#![no_main]
#![no_std]

use lagoon_firmware as _; // global logger + panicking-behavior

#[rtic::app(device = stm32h7xx_hal::pac, peripherals = true, dispatchers = [EXTI0, EXTI1, EXTI2])]
mod app {
    use daisy::led::{Led, LedUser};
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use lagoon_control::scope::SWEEP_LEN;
    use lagoon_control::view;
    use lagoon_control::{ScanRequest, SharedFrame, Store};
    use lagoon_firmware::system::display::Display;
    use lagoon_firmware::system::inputs::Inputs;
    use lagoon_firmware::system::outputs::Outputs;
    use lagoon_firmware::system::System;

    const CONTROL_PERIOD: u64 = 1; // ms
    const DISPLAY_PERIOD: u64 = 33; // ms, roughly 30 fps
    const WARM_UP_CYCLES: u32 = 64;

    /// The only state shared between the two tasks. Single writer
    /// (`control`), single reader (`render`), no locking.
    static FRAME: SharedFrame = SharedFrame::new();

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        store: Store,
        inputs: Inputs,
        outputs: Outputs,
        display: Display,
        status_led: LedUser,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);
        let mono = system.mono;
        let mut inputs = system.inputs;

        let mut store = Store::new();
        for _ in 0..WARM_UP_CYCLES {
            store.warm_up(inputs.snapshot());
        }

        control::spawn().unwrap();
        render::spawn().unwrap();
        blink::spawn(true).unwrap();

        (
            Shared {},
            Local {
                store,
                inputs,
                outputs: system.outputs,
                display: system.display,
                status_led: system.status_led,
            },
            init::Monotonics(mono),
        )
    }

    /// The input task: samples all controls, runs the state machine,
    /// drives the outputs and publishes the display frame.
    ///
    /// When the scope is active, the requested acquisition runs right
    /// inside the tick. A fast sweep blocks it for up to a second; the
    /// display simply keeps painting the previous frame meanwhile.
    #[task(local = [store, inputs, outputs], priority = 2)]
    fn control(cx: control::Context) {
        let control::LocalResources {
            store,
            inputs,
            outputs,
        } = cx.local;

        let desired = store.apply_input_snapshot(inputs.snapshot());
        outputs.apply(&desired);

        match desired.scan {
            Some(ScanRequest::Sweep { delay_us }) => {
                let mut samples = [0; SWEEP_LEN];
                inputs.acquire_sweep(&mut samples, delay_us);
                store.ingest_sweep(&samples);
                FRAME.publish_scope(&store.scope_frame());
            }
            Some(ScanRequest::Single) => {
                store.ingest_slow_sample(inputs.sample_cv());
                FRAME.publish_scope(&store.scope_frame());
            }
            None => (),
        }

        FRAME.publish(&store.frame());

        control::spawn_after(CONTROL_PERIOD.millis()).unwrap();
    }

    /// The display task: renders whatever frame was last published.
    #[task(local = [display], priority = 1)]
    fn render(cx: render::Context) {
        let display = cx.local.display;

        let frame = FRAME.load();
        let scope = FRAME.load_scope();
        view::render(display, &frame, &scope);
        display.flush();

        render::spawn_after(DISPLAY_PERIOD.millis()).unwrap();
    }

    /// Heartbeat, confirming the firmware is alive.
    #[task(local = [status_led])]
    fn blink(cx: blink::Context, on: bool) {
        if on {
            cx.local.status_led.on();
            blink::spawn_after(200.millis(), false).unwrap();
        } else {
            cx.local.status_led.off();
            blink::spawn_after(2.secs(), true).unwrap();
        }
    }
}
