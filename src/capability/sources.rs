//! Portable entropy collectors for the software generator.
//!
//! Each collector feeds whatever it can read into the accumulator and
//! silently contributes nothing when its source is missing on this host.

use super::mixing::Accumulator;
use crate::config::EntropySource;
use rand_core::{OsRng, RngCore};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Timing samples taken by the audio-jitter fallback.
const JITTER_SAMPLES: usize = 5;

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
const NET_DEV: &str = "/proc/net/dev";

/// Feeds one source's reading into `acc`.
pub(crate) fn collect(source: EntropySource, acc: &mut Accumulator, anchor: Instant) {
    match source {
        EntropySource::Cpu => collect_cpu(acc),
        EntropySource::Rdrand => collect_os_rng(acc),
        EntropySource::Memory => collect_memory(acc),
        EntropySource::Perf => {
            acc.update(&anchor.elapsed().as_nanos().to_le_bytes());
        }
        EntropySource::Disk => collect_disk(acc),
        EntropySource::Audio => collect_jitter(acc, anchor),
        EntropySource::Battery => collect_battery(acc),
        EntropySource::Network => {
            if let Ok(stats) = std::fs::read(NET_DEV) {
                acc.update(&stats);
            }
        }
    }
}

fn collect_cpu(acc: &mut Accumulator) {
    let wall = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    acc.update(&wall.to_le_bytes());

    let thread = format!("{:?}", std::thread::current().id());
    acc.update(thread.as_bytes());

    if let Ok(cores) = std::thread::available_parallelism() {
        acc.update(&cores.get().to_le_bytes());
    }
}

fn collect_os_rng(acc: &mut Accumulator) {
    let mut word = [0u8; 4];
    if OsRng.try_fill_bytes(&mut word).is_ok() {
        acc.update(&word);
    }
}

fn collect_memory(acc: &mut Accumulator) {
    let local = 0u8;
    let heap = Box::new(0u64);
    let stack_addr = &local as *const u8 as usize;
    let heap_addr = &*heap as *const u64 as usize;
    acc.update(&stack_addr.to_le_bytes());
    acc.update(&heap_addr.to_le_bytes());
}

fn collect_disk(acc: &mut Accumulator) {
    let Ok(meta) = std::fs::metadata(std::env::temp_dir()) else {
        return;
    };
    acc.update(&meta.len().to_le_bytes());
    if let Ok(modified) = meta.modified() {
        let nanos = modified
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        acc.update(&nanos.to_le_bytes());
    }
}

fn collect_jitter(acc: &mut Accumulator, anchor: Instant) {
    for _ in 0..JITTER_SAMPLES {
        acc.update(&anchor.elapsed().as_nanos().to_le_bytes());
        std::thread::yield_now();
    }
}

fn collect_battery(acc: &mut Accumulator) {
    let Ok(entries) = std::fs::read_dir(POWER_SUPPLY_DIR) else {
        return;
    };
    for entry in entries.flatten() {
        if let Ok(uevent) = std::fs::read(entry.path().join("uevent")) {
            acc.update(&uevent);
        }
    }
}
