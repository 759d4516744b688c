//! A small login page: a shadowed panel with two input fields and two
//! buttons, wired through hooks. Tab moves focus, Enter on Quit exits.

use std::cell::RefCell;
use std::rc::Rc;

use vintui::style::{Color, ColorPair};
use vintui::{
    Align, Anchor, Border, BorderDepth, CrosstermBackend, Input, KeyCode, MenuConfig,
    ParentConfig, Pos, TextConfig, Tui, TuiConfig, WidgetHooks,
};

fn main() -> Result<(), vintui::Error> {
    let mut tui = Tui::new(TuiConfig {
        color: ColorPair::new(Color::White, Color::DarkBlue),
        ..Default::default()
    });

    let menu = tui.add_menu(MenuConfig {
        name: "login".into(),
        ..Default::default()
    });

    let page = tui
        .add_parent(
            Anchor::Menu(menu),
            ParentConfig {
                name: Some("page".into()),
                rect: Some(vintui::Rect::new(0, 0, 0, 0)),
                align: Align::Center,
                pos: Pos::Center,
                is_vertical: true,
                ..Default::default()
            },
        )
        .expect("page");

    let panel = tui
        .add_parent(
            Anchor::Child(page),
            ParentConfig {
                name: Some("panel".into()),
                color: ColorPair::new(Color::Black, Color::Gray),
                border: Border {
                    is_active: true,
                    depth: BorderDepth::High,
                    ..Default::default()
                },
                has_shadow: true,
                has_padding: true,
                has_gap: true,
                is_vertical: true,
                ..Default::default()
            },
        )
        .expect("panel");

    let _ = tui.add_text(
        Anchor::Child(panel),
        TextConfig {
            string: "Sign in".into(),
            align: Align::Center,
            ..Default::default()
        },
    );

    let user_input: Rc<RefCell<Option<Input>>> = Rc::new(RefCell::new(None));
    let pass_input: Rc<RefCell<Option<Input>>> = Rc::new(RefCell::new(None));

    let user_field = {
        let input = Rc::clone(&user_input);
        tui.add_text(
            Anchor::Child(panel),
            TextConfig {
                name: Some("user".into()),
                rect: Some(vintui::Rect::new(0, 0, 20, 1)),
                color: ColorPair::new(Color::White, Color::DarkGray),
                is_interact: true,
                hooks: WidgetHooks {
                    key: Some(Box::new(move |tui, _, key| {
                        match input.borrow_mut().as_mut() {
                            Some(input) => input.handle_key(tui, key),
                            None => false,
                        }
                    })),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .expect("user field")
    };

    let pass_field = {
        let input = Rc::clone(&pass_input);
        tui.add_text(
            Anchor::Child(panel),
            TextConfig {
                name: Some("pass".into()),
                rect: Some(vintui::Rect::new(0, 1, 20, 1)),
                color: ColorPair::new(Color::White, Color::DarkGray),
                is_secret: true,
                is_interact: true,
                hooks: WidgetHooks {
                    key: Some(Box::new(move |tui, _, key| {
                        match input.borrow_mut().as_mut() {
                            Some(input) => input.handle_key(tui, key),
                            None => false,
                        }
                    })),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .expect("pass field")
    };

    *user_input.borrow_mut() = Some(Input::new(&mut tui, user_field, 32));
    *pass_input.borrow_mut() = Some(Input::new(&mut tui, pass_field, 32));

    let row = tui
        .add_parent(
            Anchor::Child(panel),
            ParentConfig {
                align: Align::Between,
                has_gap: true,
                ..Default::default()
            },
        )
        .expect("button row");

    let _ = tui.add_text(
        Anchor::Child(row),
        TextConfig {
            string: " OK ".into(),
            color: ColorPair::new(Color::Black, Color::DarkGreen),
            is_interact: true,
            ..Default::default()
        },
    );

    let _ = tui.add_text(
        Anchor::Child(row),
        TextConfig {
            string: " Quit ".into(),
            color: ColorPair::new(Color::White, Color::DarkRed),
            is_interact: true,
            hooks: WidgetHooks {
                key: Some(Box::new(|tui, _, key| {
                    if key.code == KeyCode::Enter {
                        tui.stop();
                        return true;
                    }
                    false
                })),
                ..Default::default()
            },
            ..Default::default()
        },
    );

    tui.set_menu(menu);
    tui.focus_by_path(menu, "page panel user");

    let mut backend = CrosstermBackend::stdout();
    tui.run(&mut backend)
}
