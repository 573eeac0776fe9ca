//! Built-in stretching routine

/// Activities in session order. Repeats are intentional.
pub const DEFAULT_STRETCHES: &[&str] = &[
    "Left Arm Across",
    "Right Arm Across",
    "Left Arm Over and Behind Head",
    "Right Arm Over and Behind Head",
    "Left Arm Behind Back",
    "Right Arm Behind Back",
    "Neck Left",
    "Neck Up",
    "Neck Right",
    "Neck Down",
    "Left Calf Stretch",
    "Right Calf Stretch",
    "Left Calf Stretch",
    "Right Calf Stretch",
    "Touch Toes",
    "Wide Touch Toes",
    "Touch Toes",
    "Right Quadricep",
    "Left Quadricep",
    "Left Foot Forward Lunge",
    "Right Foot Forward Lunge",
    "Left Foot Crossed Over Right Knee",
    "Right Foot Crossed Over Left Knee",
    "Legs Diamond, Lean Forward",
    "Twist, Left Leg Over",
    "Twist, Right Leg Over",
];

/// Owned copy of the built-in routine
pub fn default_activities() -> Vec<String> {
    DEFAULT_STRETCHES.iter().map(|s| s.to_string()).collect()
}
