use stock_league_core::card::{CompanyCard, IMAGE_WIDTH};
use stock_league_core::{CardContainer, PanelVisibility};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::mounts::Mounted;

#[derive(Debug, Clone, Copy)]
enum Slot {
    Click,
    Error,
}

/// An event handler owned by the container. Dropping it unhooks the element.
struct Listener {
    target: HtmlElement,
    slot: Slot,
    _handler: Closure<dyn FnMut()>,
}

impl Listener {
    fn attach(target: HtmlElement, slot: Slot, handler: Closure<dyn FnMut()>) -> Self {
        let callback = Some(handler.as_ref().unchecked_ref());
        match slot {
            Slot::Click => target.set_onclick(callback),
            Slot::Error => target.set_onerror(callback),
        }
        Self {
            target,
            slot,
            _handler: handler,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        match self.slot {
            Slot::Click => self.target.set_onclick(None),
            Slot::Error => self.target.set_onerror(None),
        }
    }
}

/// Cards rendered as DOM subtrees under one container element.
pub struct DomContainer {
    document: Document,
    root: Element,
    listeners: Vec<Listener>,
}

impl DomContainer {
    pub fn new(root: Element) -> Result<Self, JsValue> {
        let document = root
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container element has no owner document"))?;
        Ok(Self {
            document,
            root,
            listeners: Vec::new(),
        })
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        element.set_class_name(class);
        Ok(element)
    }

    fn text_element(&self, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
        let element = self.element(tag, class)?;
        element.set_text_content(Some(text));
        Ok(element)
    }

    fn image(&mut self, card: &CompanyCard) -> Result<HtmlImageElement, JsValue> {
        let image = self
            .element("img", "company-img")?
            .dyn_into::<HtmlImageElement>()?;
        image.set_width(IMAGE_WIDTH);
        image.set_alt(&card.image.alt);

        let placeholder = card.image.placeholder.clone();
        let target = image.clone();
        let on_error = Closure::<dyn FnMut()>::new(move || {
            // Unhook first so a broken placeholder cannot loop.
            target.set_onerror(None);
            target.set_src(&placeholder);
        });
        self.listeners
            .push(Listener::attach(image.clone().into(), Slot::Error, on_error));

        image.set_src(card.image.initial_src());
        Ok(image)
    }

    fn details(&self, card: &CompanyCard) -> Result<HtmlElement, JsValue> {
        let details = self
            .element("div", "score-details")?
            .dyn_into::<HtmlElement>()?;
        details
            .style()
            .set_property("display", PanelVisibility::Hidden.css_display())?;

        for line in &card.details {
            let row = self.document.create_element("p")?;
            let label = self.document.create_element("strong")?;
            label.set_text_content(Some(&format!("{}:", line.label)));
            row.append_child(&label)?;
            row.append_child(&self.document.create_text_node(&format!(" {}", line.value)))?;
            details.append_child(&row)?;
        }

        Ok(details)
    }

    fn score_toggle(
        &mut self,
        card: &CompanyCard,
        details: &HtmlElement,
    ) -> Result<HtmlElement, JsValue> {
        let button = self
            .text_element("button", "score-btn", &card.score_label)?
            .dyn_into::<HtmlElement>()?;

        let panel = details.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let style = panel.style();
            let current = style.get_property_value("display").unwrap_or_default();
            let next = PanelVisibility::from_css_display(&current).toggled();
            if let Err(error) = style.set_property("display", next.css_display()) {
                tracing::warn!(
                    error = %crate::describe_js_error(&error),
                    "failed to toggle score details"
                );
            }
        });
        self.listeners
            .push(Listener::attach(button.clone(), Slot::Click, on_click));

        Ok(button)
    }
}

impl Mounted for DomContainer {
    type Root = Element;

    fn root(&self) -> &Element {
        &self.root
    }

    fn is_attached(&self) -> bool {
        self.root.is_connected()
    }
}

impl CardContainer for DomContainer {
    type Error = JsValue;

    fn clear(&mut self) -> Result<(), JsValue> {
        self.listeners.clear();
        self.root.set_text_content(None);
        Ok(())
    }

    fn append_card(&mut self, card: CompanyCard) -> Result<(), JsValue> {
        let node = self.element("div", "company-card")?;

        let name = self.text_element("h2", "company-name", &card.title)?;
        node.append_child(&name)?;
        if let Some(industry) = &card.subtitle {
            let industry = self.text_element("p", "company-industry", industry)?;
            node.append_child(&industry)?;
        }
        let earnings = self.text_element("p", "company-earnings", &card.earnings)?;
        node.append_child(&earnings)?;
        let image = self.image(&card)?;
        node.append_child(&image)?;

        let details = self.details(&card)?;
        let toggle = self.score_toggle(&card, &details)?;
        node.append_child(&toggle)?;
        node.append_child(&details)?;

        self.root.append_child(&node)?;
        Ok(())
    }
}
