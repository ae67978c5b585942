// Keys must stay in sync between the two tables, see the parity test in `i18n`.

pub const EN: &[(&str, &str)] = &[
    ("meta.title", "Estada | Logistics & Digital Services"),
    ("nav.home", "Home"),
    ("nav.about", "About"),
    ("nav.technologies", "Technologies"),
    ("nav.contact", "Contact"),
    ("nav.menu", "Menu"),
    ("hero.title", "Logistics that moves your business forward"),
    ("hero.subtitle", "Freight coordination, warehousing and the software that ties it all together."),
    ("hero.cta", "Get in touch"),
    ("services.title", "What we do"),
    ("services.freight.title", "Freight & Transport"),
    ("services.freight.text", "Road and intermodal shipments across the Balkans and the EU, planned and tracked end to end."),
    ("services.warehousing.title", "Warehousing"),
    ("services.warehousing.text", "Flexible storage, picking and cross-docking close to the main regional corridors."),
    ("services.digital.title", "Digital Services"),
    ("services.digital.text", "Custom web platforms, integrations and dashboards that give you visibility over every order."),
    ("contact.title", "Contact us"),
    ("contact.intro", "Tell us about your project and we will reply within <strong>one business day</strong>."),
    ("contact.name", "Your name"),
    ("contact.email", "Your email"),
    ("contact.service.placeholder", "Select a service"),
    ("contact.service.logistics", "Logistics"),
    ("contact.service.warehousing", "Warehousing"),
    ("contact.service.software", "Software development"),
    ("contact.message", "Your message"),
    ("contact.submit", "Send message"),
    ("contact.sending", "Sending..."),
    ("notify.sent", "Message sent successfully! We'll be in touch soon."),
    ("notify.missing_fields", "Please fill in your name and email."),
    ("notify.invalid_email", "Please enter a valid email address."),
    ("notify.token_missing", "Security token not loaded. Please refresh the page."),
    ("notify.rejected", "Something went wrong. Please try again."),
    ("notify.token_rejected", "Your session has expired. Please try again."),
    ("notify.network", "Network error. Please check your connection and try again."),
    ("notify.close", "Close"),
    ("about.title", "About Estada"),
    ("about.lead", "A small team of logistics planners and engineers based in Skopje."),
    ("about.mission.title", "Our mission"),
    ("about.mission.text", "Make moving goods as predictable as sending an email, for companies of every size."),
    ("about.values.title", "How we work"),
    ("about.values.text", "Clear pricing, one point of contact and honest updates when plans change."),
    ("tech.title", "Technologies"),
    ("tech.lead", "The tools behind our operations and the products we build for clients."),
    ("tech.tracking.title", "Shipment tracking"),
    ("tech.tracking.text", "Live status for every consignment, from pickup to proof of delivery."),
    ("tech.platforms.title", "Web platforms"),
    ("tech.platforms.text", "Fast, secure sites and portals built with modern, type-safe tooling."),
    ("tech.integration.title", "Integrations"),
    ("tech.integration.text", "Connections to ERPs, carriers and customs systems so data only gets entered once."),
    ("footer.rights", "All rights reserved."),
    ("notfound.title", "Page not found"),
    ("notfound.back", "Back to home"),
];

pub const MK: &[(&str, &str)] = &[
    ("meta.title", "Естада | Логистика и дигитални услуги"),
    ("nav.home", "Почетна"),
    ("nav.about", "За нас"),
    ("nav.technologies", "Технологии"),
    ("nav.contact", "Контакт"),
    ("nav.menu", "Мени"),
    ("hero.title", "Логистика што го движи вашиот бизнис напред"),
    ("hero.subtitle", "Координација на товар, складирање и софтверот што сето тоа го поврзува."),
    ("hero.cta", "Контактирајте нè"),
    ("services.title", "Што работиме"),
    ("services.freight.title", "Товар и транспорт"),
    ("services.freight.text", "Патни и интермодални пратки низ Балканот и ЕУ, планирани и следени од почеток до крај."),
    ("services.warehousing.title", "Складирање"),
    ("services.warehousing.text", "Флексибилно складирање, комисионирање и претовар во близина на главните регионални коридори."),
    ("services.digital.title", "Дигитални услуги"),
    ("services.digital.text", "Веб платформи по мерка, интеграции и контролни табли што ви даваат увид во секоја нарачка."),
    ("contact.title", "Контактирајте нè"),
    ("contact.intro", "Кажете ни за вашиот проект и ќе ви одговориме во рок од <strong>еден работен ден</strong>."),
    ("contact.name", "Вашето име"),
    ("contact.email", "Вашата е-пошта"),
    ("contact.service.placeholder", "Изберете услуга"),
    ("contact.service.logistics", "Логистика"),
    ("contact.service.warehousing", "Складирање"),
    ("contact.service.software", "Развој на софтвер"),
    ("contact.message", "Вашата порака"),
    ("contact.submit", "Испрати порака"),
    ("contact.sending", "Се испраќа..."),
    ("notify.sent", "Пораката е успешно испратена! Наскоро ќе ве контактираме."),
    ("notify.missing_fields", "Ве молиме внесете име и е-пошта."),
    ("notify.invalid_email", "Ве молиме внесете валидна адреса за е-пошта."),
    ("notify.token_missing", "Безбедносниот токен не е вчитан. Ве молиме освежете ја страницата."),
    ("notify.rejected", "Нешто тргна наопаку. Ве молиме обидете се повторно."),
    ("notify.token_rejected", "Вашата сесија истече. Ве молиме обидете се повторно."),
    ("notify.network", "Мрежна грешка. Проверете ја врската и обидете се повторно."),
    ("notify.close", "Затвори"),
    ("about.title", "За Естада"),
    ("about.lead", "Мал тим од логистички планери и инженери со седиште во Скопје."),
    ("about.mission.title", "Нашата мисија"),
    ("about.mission.text", "Преносот на стоки да биде предвидлив како испраќање е-пошта, за компании од секаква големина."),
    ("about.values.title", "Како работиме"),
    ("about.values.text", "Јасни цени, едно лице за контакт и искрени информации кога плановите се менуваат."),
    ("tech.title", "Технологии"),
    ("tech.lead", "Алатките зад нашето работење и производите што ги градиме за клиентите."),
    ("tech.tracking.title", "Следење на пратки"),
    ("tech.tracking.text", "Статус во живо за секоја пратка, од подигнување до потврда за испорака."),
    ("tech.platforms.title", "Веб платформи"),
    ("tech.platforms.text", "Брзи и безбедни страници и портали изградени со модерни алатки."),
    ("tech.integration.title", "Интеграции"),
    ("tech.integration.text", "Поврзување со ERP системи, превозници и царински системи, за податоците да се внесуваат само еднаш."),
    ("footer.rights", "Сите права се задржани."),
    ("notfound.title", "Страницата не е пронајдена"),
    ("notfound.back", "Назад кон почетна"),
];
