use bevy::prelude::*;

use crate::engine::session::RevealSession;

#[derive(Component)]
pub struct CoverageText;

pub fn spawn_coverage_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Coverage: 0% | Scanning"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.75, 1.0)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                CoverageText,
            ));
        });
}

pub fn coverage_text(session: &RevealSession) -> String {
    format!(
        "Coverage: {:.0}% | {}",
        session.coverage() * 100.0,
        session.phase().label()
    )
}

pub fn coverage_text_update_system(
    session: Option<Res<RevealSession>>,
    mut query: Query<&mut Text, With<CoverageText>>,
) {
    let Some(session) = session else {
        return;
    };
    if !session.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = coverage_text(&session);
    }
}
