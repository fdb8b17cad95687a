use bus_arbiter::{BusArbiter, BusError, BusPeripheral, Frame};
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::device::Device;
use crate::pins::PinControl;
use crate::Error;

/// Run one transaction against `device`.
///
/// The shape follows from which side is non-empty: write only, read only, or
/// write then read with a repeated start and no bus release in between. The
/// bus is held for the whole transaction and released on every return path.
/// A failed phase aborts the rest of the transaction; nothing is retried.
pub(crate) async fn transfer<M, B, P>(
    bus: &BusArbiter<M, B>,
    device: &Device<M, P>,
    send: &[u8],
    receive: &mut [u8],
) -> Result<(), Error>
where
    M: RawMutex,
    B: BusPeripheral,
    P: PinControl,
{
    if send.is_empty() && receive.is_empty() {
        return Ok(());
    }

    let mut grant = bus.acquire().await;
    let address = device.address();
    let data_read = || device.ready.quiesce();

    let result: Result<(), BusError<B::Error>> = if receive.is_empty() {
        grant.write(address, send, Frame::Single).await
    } else if send.is_empty() {
        grant.read(address, receive, Frame::Single, data_read).await
    } else {
        match grant.write(address, send, Frame::First).await {
            Ok(()) => grant.read(address, receive, Frame::Last, data_read).await,
            Err(err) => Err(err),
        }
    };
    drop(grant);

    if result.is_err() {
        warn!(
            "transfer of {}+{} bytes with unit {} at {=u8:#x} failed",
            send.len(),
            receive.len(),
            device.unit(),
            address
        );
    }
    result.map_err(Error::from)
}
