//! Supports reading arm parameters and motion requests from YAML files (optional)

use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader};

use crate::ik_solver::SolverConfig;
use crate::kinematic_traits::{Joints, Target};
use crate::motion_planner::MotionRequest;
use crate::parameter_error::ParameterError;
use crate::parameters::planar_arm::Parameters;

impl Parameters {
    /// Read the arm configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Demo arm
    /// planar_arm_link_lengths:
    ///   l1: 100
    ///   l2: 80
    ///   l3: 60
    /// ```
    /// This is the same format `to_yaml` produces.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let lengths = &doc["planar_arm_link_lengths"];
        if lengths.is_badvalue() {
            return Err(ParameterError::MissingField("planar_arm_link_lengths".to_string()));
        }
        Ok(Parameters {
            l1: length(lengths, "l1")?,
            l2: length(lengths, "l2")?,
            l3: length(lengths, "l3")?,
        })
    }
}

impl MotionRequest {
    /// Read the motion request from YAML file:
    /// ```yaml
    /// current_angles: [0.0, deg(30), 0.0]
    /// target_x: 150.0
    /// target_y: 100.0
    /// # Optional, defaults shown
    /// duration: 2.5
    /// dt: 0.05
    /// l1: 100.0
    /// l2: 80.0
    /// l3: 60.0
    /// tolerance: 0.5
    /// max_iterations: 150
    /// ```
    /// Angles are in radians unless written as deg(angle).
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let current_angles = angles(&doc["current_angles"], "current_angles")?;
        let target = Target::new(required(&doc, "target_x")?, required(&doc, "target_y")?);

        let mut request = MotionRequest::new(current_angles, target);
        let defaults = request.parameters;
        request.duration = optional(&doc, "duration")?.unwrap_or(request.duration);
        request.dt = optional(&doc, "dt")?.unwrap_or(request.dt);
        request.parameters = Parameters {
            l1: optional(&doc, "l1")?.unwrap_or(defaults.l1),
            l2: optional(&doc, "l2")?.unwrap_or(defaults.l2),
            l3: optional(&doc, "l3")?.unwrap_or(defaults.l3),
        };

        let solver_defaults = SolverConfig::default();
        let max_iterations = match &doc["max_iterations"] {
            Yaml::BadValue => solver_defaults.max_iterations,
            Yaml::Integer(n) if *n >= 0 => *n as usize,
            other => return Err(ParameterError::ParseError(format!(
                "max_iterations must be a non-negative integer (got {:?})", other
            ))),
        };
        request.solver = SolverConfig {
            tolerance: optional(&doc, "tolerance")?.unwrap_or(solver_defaults.tolerance),
            max_iterations,
            ..solver_defaults
        };
        Ok(request)
    }
}

fn load_document(contents: &str) -> Result<Yaml, ParameterError> {
    let mut docs = YamlLoader::load_from_str(contents)
        .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
    if docs.is_empty() {
        return Err(ParameterError::ParseError("empty YAML document".to_string()));
    }
    Ok(docs.swap_remove(0))
}

/// Number from YAML, integers are accepted as well as reals.
fn number(value: &Yaml) -> Option<f64> {
    match value {
        Yaml::Real(_) => value.as_f64(),
        Yaml::Integer(n) => Some(*n as f64),
        _ => None,
    }
}

/// Angle in radians, or deg(angle) in degrees.
fn angle(value: &Yaml) -> Option<f64> {
    if let Yaml::String(text) = value {
        let inner = text.trim().strip_prefix("deg(")?.strip_suffix(')')?;
        return inner.trim().parse::<f64>().ok().map(f64::to_radians);
    }
    number(value)
}

fn required(doc: &Yaml, field: &str) -> Result<f64, ParameterError> {
    optional(doc, field)?.ok_or_else(|| ParameterError::MissingField(field.to_string()))
}

fn optional(doc: &Yaml, field: &str) -> Result<Option<f64>, ParameterError> {
    let value = &doc[field];
    if value.is_badvalue() {
        return Ok(None);
    }
    number(value)
        .map(Some)
        .ok_or_else(|| ParameterError::ParseError(format!("{} must be a number (got {:?})", field, value)))
}

fn length(lengths: &Yaml, field: &str) -> Result<f64, ParameterError> {
    let value = required(lengths, field)?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::InvalidValue(format!("{} must be positive (got {})", field, value)))
    }
}

fn angles(value: &Yaml, field: &str) -> Result<Joints, ParameterError> {
    let items = match value {
        Yaml::BadValue => return Err(ParameterError::MissingField(field.to_string())),
        Yaml::Array(items) => items,
        other => return Err(ParameterError::ParseError(format!(
            "{} must be a list of three angles (got {:?})", field, other
        ))),
    };
    if items.len() != 3 {
        return Err(ParameterError::InvalidLength { expected: 3, found: items.len() });
    }
    let mut joints = [0.0; 3];
    for (i, item) in items.iter().enumerate() {
        joints[i] = angle(item).ok_or_else(|| ParameterError::WrongAngle(format!(
            "{}[{}] is not an angle: {:?}", field, i, item
        )))?;
    }
    Ok(joints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_parameters_round_trip_through_yaml() {
        let parameters = Parameters { l1: 1.5, l2: 0.75, l3: 0.25 };
        let loaded = Parameters::from_yaml_str(&parameters.to_yaml()).expect("own output must load");
        assert_eq!(loaded, parameters);
    }

    #[test]
    fn test_missing_section() {
        let result = Parameters::from_yaml_str("something_else:\n  l1: 1\n");
        assert!(matches!(result, Err(ParameterError::MissingField(_))));
    }

    #[test]
    fn test_negative_length() {
        let result = Parameters::from_yaml_str("planar_arm_link_lengths:\n  l1: 1\n  l2: -2\n  l3: 1\n");
        assert!(matches!(result, Err(ParameterError::InvalidValue(_))));
    }

    #[test]
    fn test_request_defaults() {
        let request = MotionRequest::from_yaml_str(
            "current_angles: [0, 0.5, deg(-90)]\ntarget_x: 150\ntarget_y: 100.5\n",
        ).expect("valid request");
        assert_eq!(request.current_angles[1], 0.5);
        assert!((request.current_angles[2] + PI / 2.0).abs() < 1e-12);
        assert_eq!(request.target, Target::new(150.0, 100.5));
        assert_eq!(request.duration, 2.5);
        assert_eq!(request.dt, 0.05);
        assert_eq!(request.parameters, Parameters::demo_arm());
        assert_eq!(request.solver, SolverConfig::default());
    }

    #[test]
    fn test_request_overrides() {
        let request = MotionRequest::from_yaml_str(
            "current_angles: [0.0, 0.0, 0.0]\ntarget_x: 1.0\ntarget_y: 1.0\n\
             duration: 4\ndt: 0.1\nl1: 1\nl2: 1\nl3: 1\ntolerance: 0.001\nmax_iterations: 500\n",
        ).expect("valid request");
        assert_eq!(request.duration, 4.0);
        assert_eq!(request.dt, 0.1);
        assert_eq!(request.parameters, Parameters::unit_arm());
        assert_eq!(request.solver.tolerance, 0.001);
        assert_eq!(request.solver.max_iterations, 500);
        assert_eq!(request.solver.gain, 0.5);
    }

    #[test]
    fn test_request_with_two_angles() {
        let result = MotionRequest::from_yaml_str("current_angles: [0.0, 0.0]\ntarget_x: 1\ntarget_y: 1\n");
        assert!(matches!(result, Err(ParameterError::InvalidLength { expected: 3, found: 2 })));
    }

    #[test]
    fn test_request_without_target() {
        let result = MotionRequest::from_yaml_str("current_angles: [0.0, 0.0, 0.0]\ntarget_x: 1\n");
        match result {
            Err(ParameterError::MissingField(field)) => assert_eq!(field, "target_y"),
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_request_with_text_angle() {
        let result = MotionRequest::from_yaml_str("current_angles: [0.0, up, 0.0]\ntarget_x: 1\ntarget_y: 1\n");
        assert!(matches!(result, Err(ParameterError::WrongAngle(_))));
    }
}
