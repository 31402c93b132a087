// Read one Mifare card through an ER301 on a serial port.
//
//   cargo run --example read_card --features serial -- /dev/ttyUSB0 [key-a-hex]
//
// Every sector is authenticated with key A (factory default ff..ff unless
// given). Blocks are printed as they arrive; the card serial and the MD5 of
// its contents are printed at the end.

use er301::prelude::*;
use er301::transport::SerialSettings;

struct ConsoleCallback {
    key: SectorKey,
}

impl ReadCallback for ConsoleCallback {
    fn key_a(&mut self, _sector: usize) -> er301::Result<SectorKey> {
        Ok(self.key)
    }

    fn use_key_a(&self) -> bool {
        true
    }

    fn use_key_b(&self) -> bool {
        false
    }

    fn include_keys(&self) -> bool {
        false
    }

    fn on_status(&mut self, message: &str) {
        println!("{}", message);
    }

    fn on_block_read(&mut self, block: usize, data: &BlockData) {
        println!("{:3}: {}  {}", block, data.to_hex(), data.to_ascii_safe());
    }

    fn on_success(&mut self, serial: u32, digest: &str) {
        println!("serial {} md5 {}", serial, digest);
    }

    fn on_error(&mut self) {
        eprintln!("read failed");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let port = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: read_card <port> [key-a-hex]"))?;
    let key = match args.next() {
        Some(hex) => parse_key(&hex)?,
        None => SectorKey::DEFAULT,
    };

    let callback = ConsoleCallback { key };
    let mut reader = MifareReader::open_port(
        &port,
        &SerialSettings::default(),
        callback,
        ReaderConfig::default(),
    )?;
    println!("reader: {}", reader.device_name());

    match reader.run_once() {
        CycleOutcome::Completed(readout) => {
            println!(
                "{} read in {:.3} s (halted: {})",
                readout.card_type,
                readout.elapsed.as_secs_f64(),
                readout.halted
            );
            Ok(())
        }
        CycleOutcome::Failed(err) => Err(err.into()),
        CycleOutcome::Cancelled => Ok(()),
    }
}
