// WASM bindings for the course site calculators
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::angle_calculations::find_optimal_launch_angle;
use crate::constants::{PhysicsConstants, REFERENCE_FLIGHT_TIME_S};
use crate::energy::calculate_energy_with;
use crate::error::PhysicsResult;
use crate::magnus::calculate_magnus_effect_over;
use crate::momentum::calculate_collision;
use crate::trajectory_solver::{calculate_projectile_motion_with, LaunchConditions};

/// Serialize a calculation result, keeping the error message on failure.
fn json_result<T: Serialize>(result: PhysicsResult<T>) -> Result<String, String> {
    let value = result.map_err(|e| e.to_string())?;
    serde_json::to_string(&value).map_err(|e| e.to_string())
}

fn to_js(result: Result<String, String>) -> Result<String, JsValue> {
    result.map_err(|message| JsValue::from_str(&message))
}

#[wasm_bindgen]
pub struct WasmPhysics {
    constants: PhysicsConstants,
}

#[wasm_bindgen]
impl WasmPhysics {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        WasmPhysics {
            constants: PhysicsConstants::BASEBALL,
        }
    }

    /// Replace the constants table with a (partial) JSON override.
    #[wasm_bindgen(js_name = loadConstants)]
    pub fn load_constants(&mut self, json: &str) -> Result<(), JsValue> {
        self.constants =
            PhysicsConstants::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    #[wasm_bindgen(js_name = calculateProjectileMotion)]
    pub fn calculate_projectile_motion(
        &self,
        velocity: f64,
        angle_degrees: f64,
        initial_height: f64,
        use_air_resistance: bool,
    ) -> Result<String, JsValue> {
        to_js(json_result(calculate_projectile_motion_with(
            &self.constants,
            velocity,
            angle_degrees,
            initial_height,
            use_air_resistance,
        )))
    }

    #[wasm_bindgen(js_name = calculateEnergy)]
    pub fn calculate_energy(
        &self,
        mass: f64,
        velocity: f64,
        height: f64,
        force: f64,
        distance: f64,
    ) -> Result<String, JsValue> {
        to_js(json_result(calculate_energy_with(
            &self.constants,
            mass,
            velocity,
            height,
            force,
            distance,
        )))
    }

    #[wasm_bindgen(js_name = calculateCollision)]
    pub fn calculate_collision(
        &self,
        mass1: f64,
        velocity1: f64,
        mass2: f64,
        velocity2: f64,
        restitution: f64,
    ) -> Result<String, JsValue> {
        to_js(json_result(calculate_collision(
            mass1,
            velocity1,
            mass2,
            velocity2,
            restitution,
        )))
    }

    #[wasm_bindgen(js_name = calculateMagnusEffect)]
    pub fn calculate_magnus_effect(
        &self,
        velocity: f64,
        spin_rate_rpm: f64,
        spin_axis_degrees: f64,
    ) -> Result<String, JsValue> {
        to_js(json_result(calculate_magnus_effect_over(
            &self.constants,
            velocity,
            spin_rate_rpm,
            spin_axis_degrees,
            REFERENCE_FLIGHT_TIME_S,
        )))
    }

    #[wasm_bindgen(js_name = findOptimalAngle)]
    pub fn find_optimal_angle(
        &self,
        velocity: f64,
        initial_height: f64,
        use_air_resistance: bool,
    ) -> Result<String, JsValue> {
        let launch = LaunchConditions::new(velocity, 0.0, initial_height)
            .with_air_resistance(use_air_resistance);
        to_js(json_result(find_optimal_launch_angle(&launch, &self.constants)))
    }
}

impl Default for WasmPhysics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory_solver::calculate_projectile_motion;

    #[test]
    fn test_json_result_success() {
        let json = json_result(calculate_projectile_motion(30.0, 45.0, 0.0, false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["range"], 91.74);
        assert!(value.get("points").is_none());
    }

    #[test]
    fn test_json_result_error_message() {
        let err = json_result(calculate_collision(0.145, 40.0, 0.9, -25.0, 2.0)).unwrap_err();
        assert!(err.contains("restitution"));
    }
}
