//! Engine air mass flow.
//!
//! One flow worker runs per operating point. It listens on the point's
//! input channels (engine displacement arrives through the shared
//! broadcast; speed, volumetric efficiency, manifold pressure, and air
//! charge temperature are per-point), recomputes the mass flow after every
//! update, and hands the result to the point's readout widget.

use crossbeam_channel::{select, Receiver, Sender};

/// Universal gas constant, J/(kmol·K).
const R: f64 = 8314.3;
/// Molar mass of air, kg/kmol.
const M: f64 = 28.962;

/// Engine air mass flow in kg/min.
///
/// Air density from the ideal gas law at manifold pressure and air charge
/// temperature; volume flow from displacement swept once per two
/// revolutions (four-stroke, hence the integer `rpm / 2`), scaled by
/// volumetric efficiency.
pub fn mass_flow(
    displacement_cc: u32,
    rpm: u32,
    ve_percent: u32,
    act_celsius: u32,
    imap_mbar: u32,
) -> f64 {
    let pascals = f64::from(imap_mbar) * 100.0;
    let kelvin = f64::from(act_celsius) + 273.15;
    let density = (M / R) * pascals / kelvin; // kg/m³

    let cubic_metres = f64::from(displacement_cc) / 1.0e6;
    let volume_flow = cubic_metres * f64::from(rpm / 2) * (f64::from(ve_percent) / 100.0); // m³/min

    density * volume_flow
}

/// Run one operating point's flow computation until any input closes.
///
/// Every received update recomputes the flow with the latest value of each
/// input and publishes it on `flow`, which closes when the worker exits.
pub fn flow_worker(
    flow: &Sender<f64>,
    displacement: &Receiver<u32>,
    rpm: &Receiver<u32>,
    ve: &Receiver<u32>,
    act: &Receiver<u32>,
    imap: &Receiver<u32>,
) {
    let mut state = (0u32, 0u32, 0u32, 0u32, 0u32);
    loop {
        let updated = select! {
            recv(displacement) -> msg => msg.map(|v| state.0 = v),
            recv(rpm) -> msg => msg.map(|v| state.1 = v),
            recv(ve) -> msg => msg.map(|v| state.2 = v),
            recv(act) -> msg => msg.map(|v| state.3 = v),
            recv(imap) -> msg => msg.map(|v| state.4 = v),
        };
        if updated.is_err() {
            return;
        }
        let (displacement_cc, rpm, ve, act, imap) = state;
        if flow.send(mass_flow(displacement_cc, rpm, ve, act, imap)).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::thread;

    #[test]
    fn test_mass_flow_known_point() {
        // 2.0 L at 6000 rpm, 100% VE, 20 °C, 1000 mbar:
        // density ≈ 1.1883 kg/m³, volume flow 6 m³/min → ≈ 7.13 kg/min.
        let flow = mass_flow(2000, 6000, 100, 20, 1000);
        assert!((flow - 7.13).abs() < 0.01, "got {flow}");
    }

    #[test]
    fn test_mass_flow_zero_inputs() {
        assert_eq!(mass_flow(0, 0, 0, 0, 0), 0.0);
        // Odd rpm halves like the integer it is.
        assert_eq!(mass_flow(1000, 1, 100, 20, 1000), 0.0);
    }

    #[test]
    fn test_flow_worker_recomputes_per_update() {
        let (flow_tx, flow_rx) = bounded(0);
        let (disp_tx, disp_rx) = bounded(0);
        let (rpm_tx, rpm_rx) = bounded(0);
        let (ve_tx, ve_rx) = bounded(0);
        let (act_tx, act_rx) = bounded(0);
        let (imap_tx, imap_rx) = bounded(0);

        let handle = thread::spawn(move || {
            flow_worker(&flow_tx, &disp_rx, &rpm_rx, &ve_rx, &act_rx, &imap_rx);
        });

        disp_tx.send(2000).unwrap();
        assert_eq!(flow_rx.recv(), Ok(0.0));
        rpm_tx.send(6000).unwrap();
        assert_eq!(flow_rx.recv(), Ok(0.0));
        ve_tx.send(100).unwrap();
        assert_eq!(flow_rx.recv(), Ok(0.0));
        act_tx.send(20).unwrap();
        assert_eq!(flow_rx.recv(), Ok(0.0));
        imap_tx.send(1000).unwrap();
        let flow = flow_rx.recv().unwrap();
        assert!((flow - 7.13).abs() < 0.01);

        // Closing any input terminates the worker and its output.
        drop(rpm_tx);
        handle.join().unwrap();
        assert!(flow_rx.recv().is_err());
    }
}
