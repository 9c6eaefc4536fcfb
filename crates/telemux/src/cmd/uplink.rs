use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use telemux_records::{EnvironmentalRecord, MeterRecord, SensorAddress, METER_RAW_SIZE};
use telemux_uplink::{UplinkBuilder, UplinkConfig};

use crate::cmd::{parse_duration, UplinkArgs};
use crate::exit::{uplink_error, CliResult, SUCCESS};

/// Feed synthetic records from both sensor families through a real uplink.
/// Useful as a smoke test against a collector and as a wiring example.
pub fn run(args: UplinkArgs) -> CliResult<i32> {
    let interval = parse_duration(&args.interval)?;
    let retry_delay = parse_duration(&args.retry_delay)?;

    let mut config = UplinkConfig::new(args.collector.clone());
    config.retry_delay = retry_delay;

    let mut builder = UplinkBuilder::new(config);
    let env = builder
        .register(
            EnvironmentalRecord::CHANNEL_ID,
            EnvironmentalRecord::CHANNEL_NAME,
            EnvironmentalRecord::SIZE,
        )
        .map_err(|e| uplink_error("registering environmental channel", e))?;
    let meter = builder
        .register(
            MeterRecord::CHANNEL_ID,
            MeterRecord::CHANNEL_NAME,
            MeterRecord::SIZE,
        )
        .map_err(|e| uplink_error("registering meter channel", e))?;

    let worker = builder
        .start()
        .map_err(|e| uplink_error("starting uplink", e))?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        let _ = ctrlc::set_handler(move || running.store(false, Ordering::SeqCst));
    }

    info!(collector = %args.collector, "uplink running, emitting synthetic records");

    let started = Instant::now();
    let mut emitted = 0u64;
    while running.load(Ordering::SeqCst) {
        let timestamp = started.elapsed().as_millis() as i64;

        let record = synthetic_env_record(emitted, timestamp);
        env.push(record.to_bytes());

        // Meter frames arrive less often than environmental readings.
        if emitted % 5 == 0 {
            let record = synthetic_meter_record(emitted, timestamp);
            meter.push(record.to_bytes());
        }

        emitted += 1;
        if let Some(count) = args.count {
            if emitted >= count {
                break;
            }
        }
        std::thread::sleep(interval);
    }

    info!(emitted, "stopping uplink");
    worker.shutdown();
    Ok(SUCCESS)
}

fn synthetic_env_record(seq: u64, timestamp: i64) -> EnvironmentalRecord {
    EnvironmentalRecord {
        addr: SensorAddress::from_display_octets([0xA4, 0xC1, 0x38, 0x00, 0x00, 0x01], 0),
        rssi: -40,
        timestamp,
        temperature: 2000 + (seq % 100) as i16,
        humidity: 4500,
        battery_mv: 2950,
        battery_level: 90,
    }
}

fn synthetic_meter_record(seq: u64, timestamp: i64) -> MeterRecord {
    let mut raw = [0u8; METER_RAW_SIZE];
    raw[0] = (seq & 0xFF) as u8;
    MeterRecord {
        addr: SensorAddress::from_display_octets([0xA4, 0xC1, 0x38, 0x00, 0x00, 0x02], 0),
        rssi: -55,
        flags: MeterRecord::FLAG_VALID,
        timestamp,
        raw,
    }
}
