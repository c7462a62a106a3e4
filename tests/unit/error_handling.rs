//! Unit tests for bus failures after attach

use adxl345_input::config::POWER_CTL_MEASURE;
use adxl345_input::{Error, SensorSample};

use crate::common::mock_bus::MockBusError;
use crate::common::{Step, attach_default, test_utils};

#[test]
fn test_read_failure_drops_frame() {
    let (mut driver, harness) = attach_default();
    driver.open().unwrap();
    harness.bus.set_data(test_utils::raw_block(1, 2, 3));
    driver.on_interrupt();
    harness.input.clear_events();

    harness.bus.set_data(test_utils::raw_block(4, 5, 6));
    harness.bus.fail_next_read();

    assert_eq!(driver.on_interrupt(), None);
    assert!(harness.input.events().is_empty());
    assert_eq!(driver.last_reported(), Some(SensorSample::new(1, 2, 3)));
    assert_eq!(driver.state(), adxl345_input::State::Opened);
}

#[test]
fn test_recovery_after_read_failure() {
    let (mut driver, harness) = attach_default();
    driver.open().unwrap();
    harness.bus.set_data(test_utils::raw_block(4, 5, 6));

    harness.bus.fail_next_read();
    assert_eq!(driver.on_interrupt(), None);

    // The next interrupt sees the same data and reports it
    assert_eq!(driver.on_interrupt(), Some(SensorSample::new(4, 5, 6)));
    assert_eq!(harness.input.sync_count(), 1);
}

#[test]
fn test_read_sample_reports_bus_error() {
    let (mut driver, harness) = attach_default();
    harness.bus.fail_next_read();

    let result = driver.read_sample();

    assert!(matches!(result, Err(Error::Bus(MockBusError::Nack))));
}

#[test]
fn test_read_device_id_reports_bus_error() {
    let (mut driver, harness) = attach_default();
    harness.bus.fail_next_read();

    assert!(matches!(
        driver.read_device_id(),
        Err(Error::Bus(MockBusError::Nack))
    ));
}

#[test]
fn test_interrupt_while_closed_is_ignored() {
    let (mut driver, harness) = attach_default();
    harness.bus.set_data(test_utils::raw_block(1, 2, 3));
    harness.bus.clear_transactions();

    assert_eq!(driver.on_interrupt(), None);

    assert!(harness.bus.transactions().is_empty());
    assert!(harness.input.events().is_empty());
    assert_eq!(driver.last_reported(), None);
}

#[test]
fn test_standby_failure_still_releases() {
    let (mut driver, harness) = attach_default();
    driver.open().unwrap();
    harness.bus.fail_writes_to(Some(0x2D));

    driver.detach();

    assert_eq!(harness.journal.count(Step::IrqFree), 1);
    assert_eq!(harness.journal.count(Step::InputUnregister), 1);
    assert!(!harness.irq.is_requested());
    assert!(!harness.input.is_registered());
    // Still measuring
    assert_eq!(harness.bus.get_register(0x2D), POWER_CTL_MEASURE);
}
