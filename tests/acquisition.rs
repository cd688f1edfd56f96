use std::time::Duration;

use embedded_hal::i2c::{self, ErrorKind, ErrorType, Operation};
use oximeterc3::{
    spawn_ticker, trigger_channel, Acquisition, Config, Indicator, Reporter, SensorSource,
    SyntheticSource, Trigger, VirtualPin,
};

/// MAX30100 stand-in: accepts any write and serves a fixed FIFO frame.
struct FakeSensor {
    frame: [u8; 4],
}

#[derive(Debug)]
struct Nack;

impl i2c::Error for Nack {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for FakeSensor {
    type Error = Nack;
}

impl i2c::I2c for FakeSensor {
    fn transaction(&mut self, _address: u8, operations: &mut [Operation<'_>]) -> Result<(), Nack> {
        for op in operations {
            if let Operation::Read(buf) = op {
                buf.copy_from_slice(&self.frame);
            }
        }
        Ok(())
    }
}

fn parse_line(line: &str) -> (u32, u32) {
    let rest = line.strip_prefix("IR Value: ").expect("IR label");
    let (ir, red) = rest.split_once(", RED Value: ").expect("RED label");
    (ir.parse().unwrap(), red.parse().unwrap())
}

#[test]
fn three_synthetic_intervals_give_three_lines() {
    let config = Config::from_json(r#"{"interval_ms": 5, "seed": 3, "cycles": 3}"#).unwrap();

    let mut reporter = Reporter::new(Vec::new());
    reporter.banner(config.mode).unwrap();
    let led = Indicator::new(VirtualPin::default()).unwrap();
    let start_state = led.is_on();

    let (tx, rx) = trigger_channel();
    let ticker = spawn_ticker(config.interval(), tx).unwrap();

    let mut acquisition = Acquisition::new(
        Box::new(SyntheticSource::with_seed(config.seed)),
        led,
        reporter,
    );
    assert_eq!(acquisition.run(&rx, config.cycles).unwrap(), 3);

    let (led, reporter) = acquisition.into_parts();
    drop(rx);
    ticker.join().unwrap();

    assert_eq!(led.toggles(), 3);
    assert_ne!(led.is_on(), start_state);
    assert_eq!(reporter.lines(), 3);

    let text = String::from_utf8(reporter.into_inner()).unwrap();
    let mut lines = text.split_terminator("\r\n");
    assert_eq!(
        lines.next(),
        Some("Starting MAX30100 Pulse Oximeter (SIMULATION mode)...")
    );
    let samples: Vec<_> = lines.map(parse_line).collect();
    assert_eq!(samples.len(), 3);
    for (ir, red) in samples {
        assert!((25000..26000).contains(&ir), "ir {ir}");
        assert!((26000..27000).contains(&red), "red {red}");
    }
}

#[test]
fn interrupt_edges_drive_sensor_reads() {
    let bus = FakeSensor {
        frame: [0x12, 0x34, 0x56, 0x78],
    };
    let source = SensorSource::new(bus).unwrap();

    let (tx, rx) = trigger_channel();
    let forwarder = std::thread::spawn(move || {
        for _ in 0..2 {
            tx.send(Trigger::Edge).unwrap();
            std::thread::sleep(Duration::from_millis(1));
        }
    });

    let mut acquisition = Acquisition::new(
        Box::new(source),
        Indicator::new(VirtualPin::default()).unwrap(),
        Reporter::new(Vec::new()),
    );
    assert_eq!(acquisition.run(&rx, None).unwrap(), 2);
    forwarder.join().unwrap();

    let (led, reporter) = acquisition.into_parts();
    assert_eq!(led.toggles(), 2);
    assert!(!led.is_on());
    let text = String::from_utf8(reporter.into_inner()).unwrap();
    assert_eq!(
        text,
        "IR Value: 4660, RED Value: 22136\r\nIR Value: 4660, RED Value: 22136\r\n"
    );
}
