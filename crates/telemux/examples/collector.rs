//! Minimal collector: accepts one uplink connection, decodes frames and
//! prints records. Pair it with `telemux uplink 127.0.0.1:5555`.

use std::net::TcpListener;

use telemux::frame::{FrameError, FrameReader};
use telemux::records::{EnvironmentalRecord, MeterRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:5555")?;
    println!("collector listening on 127.0.0.1:5555");

    loop {
        let (stream, peer) = listener.accept()?;
        println!("uplink connected from {peer}");
        let mut reader = FrameReader::new(stream);

        loop {
            let frame = match reader.read_frame() {
                Ok(frame) => frame,
                Err(FrameError::ConnectionClosed) => {
                    println!("uplink disconnected");
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            match frame.channel {
                EnvironmentalRecord::CHANNEL_ID => {
                    let record = EnvironmentalRecord::decode(&frame.payload)?;
                    println!(
                        "env  {} rssi {} temp {:.2} °C hum {:.2} % bat {} mV ({} %)",
                        record.addr,
                        record.rssi,
                        record.temperature as f32 / 100.0,
                        record.humidity as f32 / 100.0,
                        record.battery_mv,
                        record.battery_level,
                    );
                }
                MeterRecord::CHANNEL_ID => {
                    let record = MeterRecord::decode(&frame.payload)?;
                    println!(
                        "meter {} rssi {} valid {} raw[0..8] {:02X?}",
                        record.addr,
                        record.rssi,
                        record.is_valid(),
                        &record.raw[..8],
                    );
                }
                other => println!("unhandled channel {other:#010X} ({} bytes)", frame.payload.len()),
            }
        }
    }
}
