use std::time::Instant;

use ratatui::Frame;

use talkoo_tui::model::dictionary::DictFocus;
use talkoo_tui::model::Model;
use talkoo_tui::Screen;

use super::icons::IconRenderer;
use super::legend::{self, LegendContext};
use super::{
    dialogs, dict_list, entries, layout, search, settings, status_bar, tab_bar, toast, translate,
};

/// Rendering state that is not part of the model
pub struct ViewState {
    pub icons: IconRenderer,
    pub base_url: String,
    /// First visible dictionary row, kept between frames
    pub dict_scroll: usize,
}

impl ViewState {
    pub fn new(icons: IconRenderer, base_url: String) -> Self {
        Self {
            icons,
            base_url,
            dict_scroll: 0,
        }
    }
}

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, view: &mut ViewState, model: &Model, now: Instant) {
    let size = f.area();

    let legend_ctx = LegendContext {
        screen: model.ui.screen,
        vim_mode: model.ui.vim_mode,
        dict_focus: model.dict.focus,
        entries_open: model.dict.entries.is_some(),
        editing: model.translation.editing || model.settings.editing.is_some(),
    };
    let legend_height = legend::calculate_legend_height(size.width, legend_ctx);
    let layout_info = layout::calculate_layout(size, legend_height);

    let busy = if model.ui.uploading {
        Some("Uploading...")
    } else if model.settings.saving {
        Some("Saving settings...")
    } else {
        None
    };
    tab_bar::render_tab_bar(
        f,
        layout_info.tab_area,
        model.ui.screen,
        &view.base_url,
        busy,
    );

    match model.ui.screen {
        Screen::Translate => {
            translate::render_translate(f, layout_info.content_area, &model.translation, &view.icons)
        }
        Screen::Dictionaries => {
            let dict = &model.dict;
            let areas = layout::dictionary_layout(layout_info.content_area, dict.entries.is_some());

            search::render_filter_input(
                f,
                areas.filter_area,
                &dict.prefs.filter_text,
                dict.focus == DictFocus::Filter,
                dict.prefs.sort_mode.as_str(),
            );
            dict_list::render_dict_list(
                f,
                areas.list_area,
                dict,
                dict.focus == DictFocus::List,
                &view.icons,
                &mut view.dict_scroll,
                now,
            );
            if let (Some(area), Some(entry_view)) = (areas.entries_area, dict.entries.as_ref()) {
                entries::render_entries(f, area, entry_view, dict.focus == DictFocus::Entries);
            }
        }
        Screen::Settings => settings::render_settings(f, layout_info.content_area, &model.settings),
    }

    legend::render_legend(f, layout_info.legend_area, legend_ctx);
    status_bar::render_status_bar(f, layout_info.status_area, model);

    // Overlays, innermost last
    if let Some(input) = &model.ui.upload_prompt {
        dialogs::render_upload_prompt(f, input);
    }
    if let Some(action) = &model.ui.confirm {
        dialogs::render_confirm(f, action);
    }
    if let Some(alert) = &model.ui.alert {
        dialogs::render_alert(f, alert);
    }

    if let Some((message, _timestamp)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
